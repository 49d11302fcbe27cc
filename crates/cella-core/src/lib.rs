//! # Cella Core
//!
//! 依赖注入容器的核心实现：注册表、解析引擎和进程级共享容器。
//!
//! ## 核心组件
//!
//! - [`Container`] - 注册表，提供注册操作和带记忆化的解析操作
//! - [`InstanceResolver`] - 解析器，负责递归解析依赖并构造实例
//! - [`Producer`] - 键的生产者描述（定义、工厂或实例）
//! - [`global_container`] - 进程级共享容器的便捷入口
//!
//! ## 使用示例
//!
//! ```ignore
//! let container = Container::new();
//! container.add_definition(Key::of::<dyn Foo>(), Key::of::<Bar>())?;
//! let foo: Arc<Bar> = container.resolve(Key::of::<dyn Foo>())?;
//! ```

pub mod container;
pub mod global;
pub mod producer;
pub mod resolver;

pub use container::*;
pub use global::*;
pub use producer::*;
pub use resolver::*;

pub use cella_common::{
    ContainerError, ContainerResult, Injectable, Key, ResolvedArgs, SharedInstance, TypeCatalog,
    TypeDescriptor,
};

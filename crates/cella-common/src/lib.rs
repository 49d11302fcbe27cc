//! # Cella Common
//!
//! 这个 crate 提供了 Cella 依赖注入容器的公共数据模型。
//!
//! ## 核心组件
//!
//! - [`Key`] - 注册表的不透明字符串键
//! - [`Injectable`] - 可注入能力标记 trait
//! - [`SharedInstance`] - 带类型名的共享实例
//! - [`TypeCatalog`] - 运行时类型目录
//! - [`ContainerError`] - 容器错误类型
//!
//! ## 设计原则
//!
//! - 基于显式声明的依赖键列表，不依赖运行时反射
//! - 注册时校验能力约束，尽早失败
//! - 同步优先的设计理念，解析过程没有挂起点

pub mod catalog;
pub mod errors;
pub mod injectable;
pub mod instance;
pub mod key;

pub use catalog::*;
pub use errors::*;
pub use injectable::*;
pub use instance::*;
pub use key::*;

// 供 submit_injectable!/submit_opaque! 展开使用，调用方无需自行依赖 ctor
pub use ctor;

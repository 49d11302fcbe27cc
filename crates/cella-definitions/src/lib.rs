//! # Cella Definitions
//!
//! 外部定义源适配层：把外部描述的键到生产者映射装载进容器。
//!
//! ## 核心组件
//!
//! - [`load_key_value_file`] / [`apply_key_value_file`] - 扁平
//!   `key = value` 文本格式的加载与应用
//! - [`Definitions`] / [`apply_definitions`] - 程序化的有序定义集，
//!   每个条目可以是类型名、工厂或已构造实例
//!
//! 定义按源中的顺序依次应用，任何一条失败都会中止整个装载；
//! 失败条目之前已应用的定义保持生效，调用方需要自行处理这种
//! 顺序相关的部分应用语义。

pub mod definitions;
pub mod errors;
pub mod key_value;

pub use definitions::*;
pub use errors::*;
pub use key_value::*;

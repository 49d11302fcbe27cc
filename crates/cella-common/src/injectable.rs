//! 可注入能力定义
//!
//! 提供可注入类型必须实现的基础 trait 和依赖参数的传递载体

use crate::errors::{ContainerError, ContainerResult};
use crate::instance::SharedInstance;
use crate::key::Key;
use std::sync::Arc;

/// 可注入能力标记 trait
///
/// 实现此 trait 的类型携带"可注入"能力标记，可以被任意键注册。
/// 依赖通过 [`dependency_keys`](Injectable::dependency_keys) 显式声明，
/// 容器按声明顺序解析后通过 [`construct`](Injectable::construct) 注入，
/// 不依赖任何运行时反射。
pub trait Injectable: Send + Sync + 'static {
    /// 构造依赖的键列表，按构造参数顺序排列
    fn dependency_keys() -> Vec<Key>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// 除自身类型名以外，该类型声明可以满足的键
    ///
    /// 通常是该类型实现的 trait 的键。
    fn provided_keys() -> Vec<Key>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// 使用按序解析好的依赖构造实例
    fn construct(args: &mut ResolvedArgs) -> ContainerResult<Self>
    where
        Self: Sized;
}

/// 已解析的依赖参数
///
/// 按声明顺序持有解析结果，构造函数通过 [`take`](ResolvedArgs::take)
/// 依次取出并还原为具体类型。
#[derive(Debug)]
pub struct ResolvedArgs {
    values: Vec<SharedInstance>,
    position: usize,
}

impl ResolvedArgs {
    /// 创建新的依赖参数集合
    pub fn new(values: Vec<SharedInstance>) -> Self {
        Self { values, position: 0 }
    }

    /// 按顺序取出下一个依赖参数并转换为具体类型
    pub fn take<T: Send + Sync + 'static>(&mut self) -> ContainerResult<Arc<T>> {
        let position = self.position;
        let value = self
            .values
            .get(position)
            .ok_or_else(|| ContainerError::MissingArgument {
                type_name: std::any::type_name::<T>().to_string(),
                position,
            })?;
        let typed = value.downcast::<T>()?;
        self.position += 1;
        Ok(typed)
    }

    /// 剩余未取出的参数数量
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.position)
    }

    /// 参数集合是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

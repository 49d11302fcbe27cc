//! 共享实例定义
//!
//! 类型擦除的已构造实例，附带运行时类型名

use crate::errors::{ContainerError, ContainerResult};
use crate::key::Key;
use std::any::Any;
use std::sync::Arc;

/// 共享实例
///
/// 容器中流转的实例统一以 `Arc<dyn Any + Send + Sync>` 形式持有，
/// 同时记录构造时的类型名，用于能力校验和诊断输出。
#[derive(Clone)]
pub struct SharedInstance {
    /// 实例的类型名
    type_name: Key,
    /// 类型擦除的实例
    value: Arc<dyn Any + Send + Sync>,
}

impl SharedInstance {
    /// 从值创建共享实例
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_name: Key::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// 从已有的 `Arc` 创建共享实例
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            type_name: Key::of::<T>(),
            value: value as Arc<dyn Any + Send + Sync>,
        }
    }

    /// 获取实例的类型名
    pub fn type_name(&self) -> &Key {
        &self.type_name
    }

    /// 获取类型擦除的实例
    pub fn raw(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.value)
    }

    /// 将实例转换为具体类型
    pub fn downcast<T: Send + Sync + 'static>(&self) -> ContainerResult<Arc<T>> {
        Arc::clone(&self.value)
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: self.type_name.to_string(),
            })
    }

    /// 检查两个共享实例是否指向同一个对象
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl std::fmt::Debug for SharedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInstance")
            .field("type_name", &self.type_name)
            .field("value", &"<instance>")
            .finish()
    }
}

//! 生产者描述定义
//!
//! 生产者描述"如何满足一个键"：按类型名构造、调用工厂或直接返回实例

use cella_common::{ContainerResult, Key, ResolvedArgs, SharedInstance};
use std::sync::Arc;

/// 工厂函数类型
pub type FactoryFn =
    Arc<dyn Fn(&mut ResolvedArgs) -> ContainerResult<SharedInstance> + Send + Sync>;

/// 工厂生产者
///
/// 依赖键列表在注册时显式声明，容器按声明顺序解析后传入工厂调用。
/// 声明了返回类型的工厂在注册时校验能力约束；
/// 未声明返回类型的工厂在每次构造后对产物进行校验。
#[derive(Clone)]
pub struct Factory {
    dependency_keys: Vec<Key>,
    declared_return: Option<Key>,
    function: FactoryFn,
}

impl Factory {
    /// 创建声明了返回类型的工厂
    ///
    /// 返回类型键在注册时参与能力校验。
    pub fn returning<R, F>(dependency_keys: Vec<Key>, factory: F) -> Self
    where
        R: Send + Sync + 'static,
        F: Fn(&mut ResolvedArgs) -> ContainerResult<R> + Send + Sync + 'static,
    {
        Self {
            dependency_keys,
            declared_return: Some(Key::of::<R>()),
            function: Arc::new(move |args| factory(args).map(SharedInstance::new)),
        }
    }

    /// 创建未声明返回类型的工厂
    ///
    /// 注册时不做能力校验，构造出的实例在返回前按实际类型校验。
    pub fn opaque<F>(dependency_keys: Vec<Key>, factory: F) -> Self
    where
        F: Fn(&mut ResolvedArgs) -> ContainerResult<SharedInstance> + Send + Sync + 'static,
    {
        Self {
            dependency_keys,
            declared_return: None,
            function: Arc::new(factory),
        }
    }

    /// 依赖键列表，按调用参数顺序排列
    pub fn dependency_keys(&self) -> &[Key] {
        &self.dependency_keys
    }

    /// 声明的返回类型键
    pub fn declared_return(&self) -> Option<&Key> {
        self.declared_return.as_ref()
    }

    /// 使用解析好的依赖调用工厂
    pub fn invoke(&self, args: &mut ResolvedArgs) -> ContainerResult<SharedInstance> {
        (self.function)(args)
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("dependency_keys", &self.dependency_keys)
            .field("declared_return", &self.declared_return)
            .field("function", &"<function>")
            .finish()
    }
}

/// 生产者
///
/// 注册表为每个键保存一个当前生产者。键首次解析成功后，
/// 生产者被替换为 [`Producer::Instance`]，这就是单例记忆化机制。
#[derive(Debug, Clone)]
pub enum Producer {
    /// 按目录中登记的类型名构造
    Definition {
        /// 实现类型的完全限定名
        type_name: Key,
    },
    /// 调用工厂构造
    Factory(Factory),
    /// 直接返回已构造的实例
    Instance(SharedInstance),
}

//! 依赖注入容器实现
//!
//! 容器持有键到生产者的映射，提供带校验的注册操作和
//! 带记忆化的解析操作。

use crate::producer::{Factory, Producer};
use crate::resolver::{InstanceResolver, ResolveContext};
use cella_common::{
    check_capability, global_catalog, ContainerError, ContainerResult, Key, SharedInstance,
    TypeCatalog,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// 容器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// 是否发出非致命诊断（覆盖注册、自注册回退）
    pub emit_diagnostics: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            emit_diagnostics: true,
            max_resolution_depth: 100,
        }
    }
}

/// 依赖注入容器
///
/// 惰性的单例容器：每个键在首次解析时构造，之后的解析
/// 直接返回同一个实例。
///
/// 映射由读写锁保护。解析时先克隆生产者并释放锁，再进行构造，
/// 因此递归解析可以安全地重入；同一个未解析键的并发首次解析
/// 可能各自构造一次，记忆化写入以后写为准。
pub struct Container {
    /// 键到生产者的映射
    producers: RwLock<HashMap<Key, Producer>>,
    /// 类型目录
    catalog: Arc<TypeCatalog>,
    /// 容器配置
    options: ContainerOptions,
    /// 实例解析器
    resolver: InstanceResolver,
}

impl Container {
    /// 创建使用全局类型目录的容器
    pub fn new() -> Self {
        Self::with_catalog(global_catalog())
    }

    /// 创建使用指定类型目录的容器
    ///
    /// 隔离测试应当使用独立目录，避免全局目录的登记相互干扰。
    pub fn with_catalog(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            producers: RwLock::new(HashMap::new()),
            catalog,
            options: ContainerOptions::default(),
            resolver: InstanceResolver::new(),
        }
    }

    /// 设置容器配置
    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// 获取容器配置
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// 获取类型目录
    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    /// 注册类型定义
    ///
    /// `type_name` 必须指向目录中已登记的类型，且满足 `key` 的能力约束。
    /// 类型不存在返回 [`ContainerError::TypeNotFound`]，
    /// 能力校验失败返回 [`ContainerError::NotInjectable`]。
    pub fn add_definition(
        &self,
        key: impl Into<Key>,
        type_name: impl Into<Key>,
    ) -> ContainerResult<()> {
        let key = key.into();
        let type_name = type_name.into();
        check_capability(&self.catalog, &key, &type_name)?;
        self.insert(key, Producer::Definition { type_name });
        Ok(())
    }

    /// 注册已构造的实例
    ///
    /// 实例的运行时类型必须满足 `key` 的能力约束，
    /// 否则返回 [`ContainerError::NotInjectable`]。
    pub fn add_instance<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Key>,
        instance: T,
    ) -> ContainerResult<()> {
        self.add_shared_instance(key, SharedInstance::new(instance))
    }

    /// 注册类型擦除的共享实例
    pub fn add_shared_instance(
        &self,
        key: impl Into<Key>,
        instance: SharedInstance,
    ) -> ContainerResult<()> {
        let key = key.into();
        let descriptor = self.catalog.lookup(instance.type_name()).ok_or_else(|| {
            ContainerError::not_injectable(key.as_str(), instance.type_name().as_str())
        })?;
        if !descriptor.satisfies(&key) {
            return Err(ContainerError::not_injectable(
                key.as_str(),
                instance.type_name().as_str(),
            ));
        }
        self.insert(key, Producer::Instance(instance));
        Ok(())
    }

    /// 注册工厂
    ///
    /// 声明了返回类型的工厂在此处校验能力约束；
    /// 未声明返回类型的工厂在构造后按产物的实际类型校验。
    pub fn add_factory(&self, key: impl Into<Key>, factory: Factory) -> ContainerResult<()> {
        let key = key.into();
        if let Some(declared) = factory.declared_return() {
            let descriptor = self.catalog.lookup(declared).ok_or_else(|| {
                ContainerError::not_injectable(key.as_str(), declared.as_str())
            })?;
            if !descriptor.satisfies(&key) {
                return Err(ContainerError::not_injectable(
                    key.as_str(),
                    declared.as_str(),
                ));
            }
        }
        self.insert(key, Producer::Factory(factory));
        Ok(())
    }

    /// 解析键并转换为具体类型
    pub fn resolve<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Key>,
    ) -> ContainerResult<Arc<T>> {
        self.resolve_key(key)?.downcast()
    }

    /// 以类型自身的键解析
    pub fn resolve_type<T: Send + Sync + 'static>(&self) -> ContainerResult<Arc<T>> {
        self.resolve(Key::of::<T>())
    }

    /// 解析键，返回类型擦除的单例实例
    ///
    /// 未注册的键回退为自注册定义（以键本身作为类型名），
    /// 回退仍然经过能力校验，对不符合约束的类型快速失败。
    /// 首次解析成功后结果被记忆化，之后的解析恒返回同一实例。
    pub fn resolve_key(&self, key: impl Into<Key>) -> ContainerResult<SharedInstance> {
        let key = key.into();
        let mut cx = ResolveContext::new(self.options.max_resolution_depth);
        self.resolve_in_context(&key, &mut cx)
    }

    /// 在既有解析上下文中解析键，供解析器递归回调
    pub(crate) fn resolve_in_context(
        &self,
        key: &Key,
        cx: &mut ResolveContext,
    ) -> ContainerResult<SharedInstance> {
        cx.push_key(key)?;
        let result = self.resolve_producer(key, cx);
        cx.pop_key();
        result
    }

    fn resolve_producer(
        &self,
        key: &Key,
        cx: &mut ResolveContext,
    ) -> ContainerResult<SharedInstance> {
        // 克隆生产者后立即释放读锁，构造期间不持锁
        let producer = { self.producers.read().get(key).cloned() };

        let producer = match producer {
            Some(producer) => producer,
            None => {
                if self.options.emit_diagnostics {
                    warn!("键未显式注册，回退为自注册定义: {}", key);
                }
                self.add_definition(key.clone(), key.clone())?;
                Producer::Definition {
                    type_name: key.clone(),
                }
            }
        };

        if let Producer::Instance(instance) = &producer {
            return Ok(instance.clone());
        }

        let instance = self.resolver.instantiate(self, key, &producer, cx)?;

        // 记忆化：以实例生产者替换原生产者
        self.producers
            .write()
            .insert(key.clone(), Producer::Instance(instance.clone()));

        Ok(instance)
    }

    /// 检查键是否已注册
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        self.producers.read().contains_key(&key.into())
    }

    /// 移除所有注册的定义和实例
    pub fn clear(&self) {
        self.producers.write().clear();
    }

    fn insert(&self, key: Key, producer: Producer) {
        let mut producers = self.producers.write();
        if producers.insert(key.clone(), producer).is_some() && self.options.emit_diagnostics {
            warn!("覆盖已存在的注册: {}", key);
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.producers.read().len())
            .field("options", &self.options)
            .finish()
    }
}

//! 实例解析器实现
//!
//! 解析器负责按生产者描述构造实例：递归解析依赖键，
//! 再调用目录中的构造函数或注册的工厂。

use crate::container::Container;
use crate::producer::Producer;
use cella_common::{ContainerError, ContainerResult, Key, ResolvedArgs, SharedInstance};
use tracing::debug;

/// 解析上下文
///
/// 每次顶层解析持有一条进行中的键链，用于快速检测循环依赖，
/// 并以最大深度兜底异常的依赖图。
#[derive(Debug)]
pub struct ResolveContext {
    /// 当前解析链
    chain: Vec<Key>,
    /// 最大解析深度
    max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            chain: Vec::new(),
            max_depth,
        }
    }

    /// 将键压入解析链
    ///
    /// 键已在链上说明出现循环依赖，返回
    /// [`ContainerError::CircularDependency`] 并携带完整链路。
    pub fn push_key(&mut self, key: &Key) -> ContainerResult<()> {
        if self.chain.contains(key) {
            let mut chain: Vec<&str> = self.chain.iter().map(Key::as_str).collect();
            chain.push(key.as_str());
            return Err(ContainerError::CircularDependency {
                chain: chain.join(" -> "),
            });
        }
        if self.chain.len() >= self.max_depth {
            return Err(ContainerError::DepthExceeded {
                key: key.to_string(),
                max_depth: self.max_depth,
            });
        }
        self.chain.push(key.clone());
        Ok(())
    }

    /// 从解析链弹出最近的键
    pub fn pop_key(&mut self) {
        self.chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// 实例解析器
///
/// 按生产者变体分派构造行为，依赖通过容器递归解析。
#[derive(Debug, Default)]
pub struct InstanceResolver;

impl InstanceResolver {
    /// 创建新的解析器
    pub fn new() -> Self {
        Self
    }

    /// 按生产者描述构造实例
    pub fn instantiate(
        &self,
        container: &Container,
        key: &Key,
        producer: &Producer,
        cx: &mut ResolveContext,
    ) -> ContainerResult<SharedInstance> {
        match producer {
            Producer::Instance(instance) => Ok(instance.clone()),

            Producer::Definition { type_name } => {
                let descriptor = container
                    .catalog()
                    .lookup(type_name)
                    .ok_or_else(|| ContainerError::type_not_found(type_name.as_str()))?;
                let construct = descriptor.construct.ok_or_else(|| {
                    ContainerError::not_injectable(key.as_str(), type_name.as_str())
                })?;

                let mut args =
                    self.resolve_dependencies(container, &descriptor.dependencies, cx)?;
                debug!("构造实例: {}", type_name);
                construct(&mut args)
            }

            Producer::Factory(factory) => {
                let mut args =
                    self.resolve_dependencies(container, factory.dependency_keys(), cx)?;
                debug!("调用工厂: {}", key);
                let instance = factory.invoke(&mut args)?;

                // 未声明返回类型的工厂按产物的实际类型校验能力约束
                if factory.declared_return().is_none() {
                    let descriptor =
                        container
                            .catalog()
                            .lookup(instance.type_name())
                            .ok_or_else(|| {
                                ContainerError::not_injectable(
                                    key.as_str(),
                                    instance.type_name().as_str(),
                                )
                            })?;
                    if !descriptor.satisfies(key) {
                        return Err(ContainerError::not_injectable(
                            key.as_str(),
                            instance.type_name().as_str(),
                        ));
                    }
                }

                Ok(instance)
            }
        }
    }

    /// 按声明顺序递归解析依赖键
    fn resolve_dependencies(
        &self,
        container: &Container,
        keys: &[Key],
        cx: &mut ResolveContext,
    ) -> ContainerResult<ResolvedArgs> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(container.resolve_in_context(key, cx)?);
        }
        Ok(ResolvedArgs::new(values))
    }
}

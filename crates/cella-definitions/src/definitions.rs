//! 程序化定义集
//!
//! 有序的键到定义值映射。定义集在代码中构建为一等值，
//! 条目可以是类型名、工厂或已构造实例。

use crate::errors::DefinitionsResult;
use cella_common::{Key, SharedInstance};
use cella_core::{Container, Factory};
use tracing::info;

/// 定义值
///
/// 按值的形态分派到对应的注册操作。
#[derive(Debug)]
pub enum DefinitionValue {
    /// 实现类型的完全限定名，经由 `add_definition` 注册
    Definition(Key),
    /// 工厂，经由 `add_factory` 注册
    Factory(Factory),
    /// 已构造实例，经由 `add_instance` 注册
    Instance(SharedInstance),
}

/// 有序定义集
///
/// 条目按加入顺序应用，顺序决定了装载失败时哪些定义已经生效。
#[derive(Debug, Default)]
pub struct Definitions {
    entries: Vec<(Key, DefinitionValue)>,
}

impl Definitions {
    /// 创建新的空定义集
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 追加类型定义条目
    pub fn definition(mut self, key: impl Into<Key>, type_name: impl Into<Key>) -> Self {
        self.entries
            .push((key.into(), DefinitionValue::Definition(type_name.into())));
        self
    }

    /// 追加工厂条目
    pub fn factory(mut self, key: impl Into<Key>, factory: Factory) -> Self {
        self.entries
            .push((key.into(), DefinitionValue::Factory(factory)));
        self
    }

    /// 追加实例条目
    pub fn instance<T: Send + Sync + 'static>(mut self, key: impl Into<Key>, instance: T) -> Self {
        self.entries.push((
            key.into(),
            DefinitionValue::Instance(SharedInstance::new(instance)),
        ));
        self
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 定义集是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按顺序遍历条目
    pub fn iter(&self) -> impl Iterator<Item = &(Key, DefinitionValue)> {
        self.entries.iter()
    }
}

/// 将定义集应用到容器
///
/// 条目按加入顺序依次分派到 `add_definition`、`add_factory` 或
/// `add_instance`，返回成功应用的条目数。任何一条注册失败都会
/// 中止装载；失败条目之前的定义保持生效。
pub fn apply_definitions(
    container: &Container,
    definitions: Definitions,
) -> DefinitionsResult<usize> {
    let total = definitions.len();
    let mut applied = 0;

    for (key, value) in definitions.entries {
        match value {
            DefinitionValue::Definition(type_name) => {
                container.add_definition(key, type_name)?;
            }
            DefinitionValue::Factory(factory) => {
                container.add_factory(key, factory)?;
            }
            DefinitionValue::Instance(instance) => {
                container.add_shared_instance(key, instance)?;
            }
        }
        applied += 1;
    }

    info!("定义集装载完成: {applied}/{total} 条");
    Ok(applied)
}

/// 从定义集创建新容器
///
/// 容器使用全局类型目录。装载失败时错误原样传播。
pub fn container_from_definitions(definitions: Definitions) -> DefinitionsResult<Container> {
    let container = Container::new();
    apply_definitions(&container, definitions)?;
    Ok(container)
}

//! 运行时类型目录
//!
//! 目录是"运行中的系统里存在哪些类型"的登记表：
//! 按类型名查找构造方式、依赖声明和能力标记。

use crate::errors::{ContainerError, ContainerResult};
use crate::injectable::{Injectable, ResolvedArgs};
use crate::instance::SharedInstance;
use crate::key::Key;
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// 类型擦除的构造函数
pub type ConstructFn = fn(&mut ResolvedArgs) -> ContainerResult<SharedInstance>;

/// 类型描述符
///
/// 描述一个已登记类型的能力标记、可满足的键、依赖声明和构造方式。
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// 类型的完全限定名
    pub type_name: Key,
    /// 类型 ID
    pub type_id: TypeId,
    /// 是否携带可注入能力标记
    pub injectable: bool,
    /// 除自身类型名以外可满足的键
    pub provides: Vec<Key>,
    /// 构造依赖的键列表，按构造参数顺序排列
    pub dependencies: Vec<Key>,
    /// 构造函数，不可注入类型没有构造方式
    pub construct: Option<ConstructFn>,
}

fn construct_erased<T: Injectable>(args: &mut ResolvedArgs) -> ContainerResult<SharedInstance> {
    T::construct(args).map(SharedInstance::new)
}

impl TypeDescriptor {
    /// 从可注入类型创建描述符
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_name: Key::of::<T>(),
            type_id: TypeId::of::<T>(),
            injectable: true,
            provides: T::provided_keys(),
            dependencies: T::dependency_keys(),
            construct: Some(construct_erased::<T>),
        }
    }

    /// 为已知但不可注入的类型创建描述符
    ///
    /// 这类类型存在于系统中，但未携带能力标记，注册到容器时会被拒绝。
    pub fn opaque<T: Send + Sync + 'static>() -> Self {
        Self {
            type_name: Key::of::<T>(),
            type_id: TypeId::of::<T>(),
            injectable: false,
            provides: Vec::new(),
            dependencies: Vec::new(),
            construct: None,
        }
    }

    /// 设置能力标记
    pub fn with_injectable(mut self, injectable: bool) -> Self {
        self.injectable = injectable;
        self
    }

    /// 追加可满足的键
    pub fn with_provides(mut self, key: impl Into<Key>) -> Self {
        self.provides.push(key.into());
        self
    }

    /// 检查该类型是否可以满足指定键的能力约束
    ///
    /// 携带能力标记，或显式声明实现了该键，两者满足其一即可。
    pub fn satisfies(&self, key: &Key) -> bool {
        self.injectable || self.provides.contains(key)
    }
}

/// 类型目录
///
/// 按类型名索引的描述符表。容器默认共享进程级全局目录，
/// 隔离测试可以通过独立目录构造容器。
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: DashMap<Key, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
    /// 创建新的空目录
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 登记可注入类型
    pub fn register<T: Injectable>(&self) {
        self.register_descriptor(TypeDescriptor::of::<T>());
    }

    /// 登记已知但不可注入的类型
    pub fn register_opaque<T: Send + Sync + 'static>(&self) {
        self.register_descriptor(TypeDescriptor::opaque::<T>());
    }

    /// 登记类型描述符
    pub fn register_descriptor(&self, descriptor: TypeDescriptor) {
        debug!("登记类型: {}", descriptor.type_name);
        self.entries
            .insert(descriptor.type_name.clone(), Arc::new(descriptor));
    }

    /// 按类型名查找描述符
    pub fn lookup(&self, type_name: &Key) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(type_name).map(|entry| Arc::clone(&entry))
    }

    /// 检查类型是否已登记
    pub fn contains(&self, type_name: &Key) -> bool {
        self.entries.contains_key(type_name)
    }

    /// 已登记类型数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 进程级全局类型目录
static GLOBAL_TYPE_CATALOG: once_cell::sync::Lazy<Arc<TypeCatalog>> =
    once_cell::sync::Lazy::new(|| Arc::new(TypeCatalog::new()));

/// 获取全局类型目录
pub fn global_catalog() -> Arc<TypeCatalog> {
    Arc::clone(&GLOBAL_TYPE_CATALOG)
}

/// 在程序启动时将可注入类型登记到全局目录
///
/// 展开为一个 `ctor` 构造函数，通过本 crate 的再导出引用 `ctor`。
///
/// ```ignore
/// submit_injectable!(ServiceA);
/// ```
#[macro_export]
macro_rules! submit_injectable {
    ($ty:ty) => {
        const _: () = {
            #[$crate::ctor::ctor]
            fn register() {
                $crate::global_catalog().register::<$ty>();
            }
        };
    };
}

/// 在程序启动时将不可注入类型登记到全局目录
#[macro_export]
macro_rules! submit_opaque {
    ($ty:ty) => {
        const _: () = {
            #[$crate::ctor::ctor]
            fn register() {
                $crate::global_catalog().register_opaque::<$ty>();
            }
        };
    };
}

/// 按能力约束校验类型，供注册操作使用
///
/// 类型不存在返回 [`ContainerError::TypeNotFound`]，
/// 能力校验失败返回 [`ContainerError::NotInjectable`]。
pub fn check_capability(
    catalog: &TypeCatalog,
    key: &Key,
    type_name: &Key,
) -> ContainerResult<Arc<TypeDescriptor>> {
    let descriptor = catalog
        .lookup(type_name)
        .ok_or_else(|| ContainerError::type_not_found(type_name.as_str()))?;

    if descriptor.satisfies(key) {
        Ok(descriptor)
    } else {
        Err(ContainerError::not_injectable(
            key.as_str(),
            type_name.as_str(),
        ))
    }
}

//! 进程级共享容器
//!
//! 包装唯一一个惰性创建的容器实例，是一个便捷入口而非唯一入口。
//! 需要隔离的场景（例如测试）应当直接构造 [`Container`]。

use crate::container::Container;
use once_cell::sync::Lazy;

/// 进程级共享容器实例，在首次访问时以线程安全的方式创建
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::new);

/// 获取进程级共享容器
///
/// 共享容器使用全局类型目录，生命周期与进程一致。
pub fn global_container() -> &'static Container {
    &GLOBAL_CONTAINER
}

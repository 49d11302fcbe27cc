//! 注册键定义
//!
//! 键是注册表的不透明字符串标识符，约定使用类型的完全限定名

use std::fmt;

/// 注册键
///
/// 键在单个注册表内唯一，通常是接口、抽象类型或具体类型的完全限定名。
/// 键本身不携带任何类型信息，能力校验由类型目录完成。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// 从任意字符串创建键
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 从类型创建键
    ///
    /// 支持 trait object，例如 `Key::of::<dyn BaseService>()`。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// 获取键的字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 获取简短名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

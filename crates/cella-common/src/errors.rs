//! 错误类型定义

use thiserror::Error;

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("类型不存在: {type_name}")]
    TypeNotFound { type_name: String },

    #[error("类型不可注入: {type_name} 无法满足键 {key}")]
    NotInjectable { key: String, type_name: String },

    #[error("检测到循环依赖: {chain}")]
    CircularDependency { chain: String },

    #[error("解析深度超过上限 {max_depth}: {key}")]
    DepthExceeded { key: String, max_depth: usize },

    #[error("类型转换失败: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("缺少第 {position} 个依赖参数: {type_name}")]
    MissingArgument { type_name: String, position: usize },

    #[error("实例构造失败: {type_name}, 原因: {message}")]
    ConstructionFailed { type_name: String, message: String },
}

impl ContainerError {
    /// 创建类型不存在错误
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// 创建类型不可注入错误
    pub fn not_injectable(key: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::NotInjectable {
            key: key.into(),
            type_name: type_name.into(),
        }
    }

    /// 创建实例构造失败错误
    pub fn construction_failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type ContainerResult<T> = Result<T, ContainerError>;

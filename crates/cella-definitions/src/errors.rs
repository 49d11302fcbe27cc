//! 错误类型定义

use cella_common::ContainerError;
use thiserror::Error;

/// 定义装载错误类型
#[derive(Error, Debug)]
pub enum DefinitionsError {
    #[error("定义文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("定义文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("定义文件第 {line} 行格式无效: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("定义应用失败: {source}")]
    Registration {
        #[from]
        source: ContainerError,
    },
}

/// 结果类型别名
pub type DefinitionsResult<T> = Result<T, DefinitionsError>;

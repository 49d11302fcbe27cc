//! 键值定义文件装载
//!
//! 支持扁平的 `key = value` 文本格式：每行一条类型定义，
//! 键是注册键，值是实现类型的完全限定名。

use crate::errors::{DefinitionsError, DefinitionsResult};
use cella_core::Container;
use std::path::Path;
use tracing::{debug, info};

/// 解析键值定义文本
///
/// 空行、`;` 或 `#` 开头的注释行以及 `[section]` 小节头被跳过，
/// 值两侧成对的引号被剥除。其余不含 `=` 的行视为格式错误。
pub fn parse_key_value(content: &str) -> DefinitionsResult<Vec<(String, String)>> {
    let mut entries = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| DefinitionsError::InvalidLine {
                line: index + 1,
                content: line.to_string(),
            })?;

        let key = key.trim();
        let value = strip_quotes(value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(DefinitionsError::InvalidLine {
                line: index + 1,
                content: line.to_string(),
            });
        }

        entries.push((key.to_string(), value.to_string()));
    }

    Ok(entries)
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// 从文件装载键值定义
pub fn load_key_value_file(path: impl AsRef<Path>) -> DefinitionsResult<Vec<(String, String)>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DefinitionsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    debug!("装载键值定义文件: {}", path.display());
    parse_key_value(&content)
}

/// 将键值定义文件应用到容器
///
/// 条目按文件顺序依次注册为类型定义，返回成功应用的条目数。
/// 任何一条注册失败都会中止装载；失败条目之前的定义保持生效。
pub fn apply_key_value_file(
    container: &Container,
    path: impl AsRef<Path>,
) -> DefinitionsResult<usize> {
    let entries = load_key_value_file(&path)?;

    let mut applied = 0;
    for (key, type_name) in entries {
        container.add_definition(key.as_str(), type_name.as_str())?;
        applied += 1;
    }

    info!(
        "键值定义装载完成: {}, 共 {} 条",
        path.as_ref().display(),
        applied
    );
    Ok(applied)
}

/// 从键值定义文件创建新容器
///
/// 容器使用全局类型目录。装载失败时错误原样传播。
pub fn container_from_key_value_file(path: impl AsRef<Path>) -> DefinitionsResult<Container> {
    let container = Container::new();
    apply_key_value_file(&container, path)?;
    Ok(container)
}

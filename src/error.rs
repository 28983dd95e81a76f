//! # 统一错误处理模块
//!
//! 定义 slurm-series 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - `ImageOpenError` 是唯一可以局部恢复的错误（跳过该文件）
//! - 其余错误都会终止本次运行
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// slurm-series 统一错误类型
#[derive(Error, Debug)]
pub enum SeriesError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Input is not a directory: {path} - aborting.")]
    NotADirectory { path: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 输出文件错误
    // ─────────────────────────────────────────────────────────────
    #[error("Could not delete {path} - aborting.")]
    FileDeleteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create {path} - aborting.")]
    FileCreateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Encountered a problem writing {path} - aborting.")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 遍历与读取错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read directory: {path}")]
    DirectoryReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialise {path}: {reason}")]
    ImageOpenError { path: String, reason: String },

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse job list {path}, line {line}\nReason: {reason}")]
    ParseError {
        path: String,
        line: u64,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl SeriesError {
    /// 是否可以跳过当前文件继续运行
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SeriesError::ImageOpenError { .. })
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_errors_are_recoverable() {
        let open = SeriesError::ImageOpenError {
            path: "a.tif".to_string(),
            reason: "truncated".to_string(),
        };
        assert!(open.is_recoverable());

        let not_dir = SeriesError::NotADirectory {
            path: "/nope".to_string(),
        };
        assert!(!not_dir.is_recoverable());
        assert_eq!(
            not_dir.to_string(),
            "Input is not a directory: /nope - aborting."
        );
    }
}

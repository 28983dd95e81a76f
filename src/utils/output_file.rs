//! # 输出文件事务
//!
//! 以作用域方式获取可写文件句柄：已存在的文件先删除，不存在则新建。
//! 句柄在任何退出路径上都会随 `Drop` 关闭；`finish` 显式刷新缓冲，
//! 让写入错误能够被上报。
//!
//! 两个输出文件各自独立，不存在跨文件的事务，
//! 作业列表写完而脚本失败是可能出现的结果。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `error.rs`

use crate::error::{Result, SeriesError};

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 独占写入的输出文件
pub struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    /// 删除旧文件（如存在）并新建
    pub fn create(path: &Path) -> Result<Self> {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        if path.exists() {
            fs::remove_file(&path).map_err(|e| SeriesError::FileDeleteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| SeriesError::FileCreateError {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// 写入一段文本
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| self.write_error(e))
    }

    /// 刷新并关闭
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush().map_err(|e| self.write_error(e))?;
        Ok(self.path)
    }

    fn write_error(&self, source: std::io::Error) -> SeriesError {
        SeriesError::FileWriteError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

//! # 图像读取接口
//!
//! 遍历器只依赖 `ImageReader` 这一接口：列出目录中的有效图像文件、
//! 打开文件、报告 series 数量。容器格式的解析细节不在本工具范围内。
//!
//! ## 依赖关系
//! - 被 `jobs/walker.rs` 使用
//! - 子模块: pattern（基于文件名模式的默认实现）

pub mod pattern;

pub use pattern::PatternReader;

use crate::error::Result;
use std::path::Path;

/// 多 series 图像文件的读取器
pub trait ImageReader {
    /// 打开后的文件句柄
    type Handle;

    /// 列出目录中可被读取的文件名（不含目录部分）
    fn list_valid_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// 打开文件；失败时返回 `SeriesError::ImageOpenError`
    fn open(&self, path: &Path) -> Result<Self::Handle>;

    /// 文件包含的 series 数量
    fn series_count(&self, handle: &Self::Handle) -> u32;
}

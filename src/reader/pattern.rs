//! # 基于文件名模式的读取器
//!
//! - 按 glob 模式（不区分大小写）筛选目录中的图像文件
//! - 打开文件时检查可读且非空
//! - series 数量默认为 1；若存在 `<file>.series` 旁注文件，
//!   则读取其中的十进制整数作为 series 数量
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 构造，传给 `jobs/walker.rs`
//! - 使用 `glob` crate

use super::ImageReader;
use crate::error::{Result, SeriesError};

use glob::{MatchOptions, Pattern};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// 默认识别的显微图像容器格式
pub const DEFAULT_PATTERNS: &str = "*.tif,*.tiff,*.czi,*.lif,*.nd2,*.lsm,*.ims,*.oib,*.vsi";

/// series 旁注文件的扩展名
pub const SERIES_SIDECAR_EXT: &str = "series";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// 已打开的图像文件
#[derive(Debug, Clone)]
pub struct PatternImage {
    pub series_count: u32,
}

/// 基于文件名模式的读取器
pub struct PatternReader {
    patterns: Vec<Pattern>,
}

impl PatternReader {
    /// 由逗号分隔的多模式创建
    pub fn from_patterns(patterns: &str) -> Result<Self> {
        let patterns = patterns
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    SeriesError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if patterns.is_empty() {
            return Err(SeriesError::InvalidArgument(
                "At least one file pattern is required".to_string(),
            ));
        }

        Ok(Self { patterns })
    }

    /// 检查文件名是否匹配任一模式
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
    }

    fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(SERIES_SIDECAR_EXT);
        PathBuf::from(name)
    }

    fn read_sidecar(path: &Path) -> Result<Option<u32>> {
        let sidecar = Self::sidecar_path(path);
        if !sidecar.is_file() {
            return Ok(None);
        }

        let text = fs::read_to_string(&sidecar).map_err(|e| SeriesError::ImageOpenError {
            path: path.display().to_string(),
            reason: format!("unreadable {}: {}", sidecar.display(), e),
        })?;

        text.trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| SeriesError::ImageOpenError {
                path: path.display().to_string(),
                reason: format!("invalid series count '{}'", text.trim()),
            })
    }
}

impl Default for PatternReader {
    fn default() -> Self {
        // DEFAULT_PATTERNS 中的模式均为合法 glob
        let patterns = DEFAULT_PATTERNS
            .split(',')
            .filter_map(|s| Pattern::new(s).ok())
            .collect();
        Self { patterns }
    }
}

impl ImageReader for PatternReader {
    type Handle = PatternImage;

    fn list_valid_files(&self, dir: &Path) -> Result<Vec<String>> {
        let read_err = |e: std::io::Error| SeriesError::DirectoryReadError {
            path: dir.display().to_string(),
            source: e,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.matches(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn open(&self, path: &Path) -> Result<PatternImage> {
        let open_err = |reason: String| SeriesError::ImageOpenError {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(path).map_err(|e| open_err(e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| open_err(e.to_string()))?
            .len();
        if len == 0 {
            return Err(open_err("file is empty".to_string()));
        }

        let series_count = Self::read_sidecar(path)?.unwrap_or(1);

        Ok(PatternImage { series_count })
    }

    fn series_count(&self, handle: &PatternImage) -> u32 {
        handle.series_count
    }
}

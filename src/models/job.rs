//! # 作业数据模型
//!
//! - `WorkUnit`: 一个 (文件, series) 工作单元
//! - `JobRecord`: 带有作业编号的工作单元，对应作业列表中的一行
//!
//! 作业列表行格式：`<jobId>, <absolutePath>, <seriesIndex>`
//!
//! ## 依赖关系
//! - 被 `jobs/` 和 `commands/` 使用

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 字段分隔符
pub const FIELD_SEPARATOR: &str = ", ";

/// 单个 (文件, series) 工作单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    /// 图像文件的绝对路径
    pub file_path: PathBuf,
    /// series 索引，范围 [0, seriesCount)
    pub series_index: u32,
}

impl WorkUnit {
    pub fn new(file_path: impl Into<PathBuf>, series_index: u32) -> Self {
        WorkUnit {
            file_path: file_path.into(),
            series_index,
        }
    }

    /// 赋予作业编号
    pub fn into_record(self, job_id: u64) -> JobRecord {
        JobRecord {
            job_id,
            file_path: self.file_path.display().to_string(),
            series_index: self.series_index,
        }
    }
}

/// 作业列表中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub job_id: u64,
    pub file_path: String,
    pub series_index: u32,
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.job_id,
            self.file_path,
            self.series_index,
            sep = FIELD_SEPARATOR
        )
    }
}

impl FromStr for JobRecord {
    type Err = String;

    /// 编号取第一个分隔符之前，series 取最后一个分隔符之后，
    /// 中间部分整体作为路径，因此路径内的 ", " 不会破坏解析。
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);

        let (id, rest) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| format!("expected 3 fields in '{}'", line))?;
        let (path, series) = rest
            .rsplit_once(FIELD_SEPARATOR)
            .ok_or_else(|| format!("expected 3 fields in '{}'", line))?;

        let job_id = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid job id '{}'", id))?;
        let series_index = series
            .trim()
            .parse()
            .map_err(|_| format!("invalid series index '{}'", series))?;

        if path.is_empty() {
            return Err("empty file path".to_string());
        }

        Ok(JobRecord {
            job_id,
            file_path: path.to_string(),
            series_index,
        })
    }
}

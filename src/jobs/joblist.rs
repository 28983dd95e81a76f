//! # 作业列表
//!
//! - 写入：为工作单元序列分配从 0 开始的连续编号，每条记录一行
//! - 读取：把作业列表解析回 `JobRecord`（供 inspect 与计算节点查询）
//!
//! 打开失败而被跳过的文件不会占用编号。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/inspect.rs` 使用
//! - 使用 `models/job.rs`, `utils/output_file.rs`

use crate::error::{Result, SeriesError};
use crate::models::{JobRecord, WorkUnit};
use crate::utils::output_file::OutputFile;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// 写入完成后的作业列表概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListSummary {
    /// 作业列表文件的绝对路径
    pub path: PathBuf,
    /// 记录条数
    pub job_count: u64,
}

/// 为工作单元分配连续编号
pub fn assign_ids<I>(units: I) -> impl Iterator<Item = Result<JobRecord>>
where
    I: IntoIterator<Item = Result<WorkUnit>>,
{
    units
        .into_iter()
        .zip(0u64..)
        .map(|(unit, job_id)| unit.map(|u| u.into_record(job_id)))
}

/// 消费工作单元序列并写入作业列表
///
/// 任何错误都会立即中止，已写入的部分保留在磁盘上。
pub fn write_job_list<I, F>(
    units: I,
    mut out: OutputFile,
    mut on_record: F,
) -> Result<JobListSummary>
where
    I: IntoIterator<Item = Result<WorkUnit>>,
    F: FnMut(&JobRecord),
{
    let job_count = assign_ids(units).try_fold(0u64, |count, record| {
        let record = record?;
        out.write_str(&format!("{}\n", record))?;
        on_record(&record);
        Ok::<_, SeriesError>(count + 1)
    })?;

    let path = out.finish()?;
    Ok(JobListSummary { path, job_count })
}

/// 读取作业列表文件
pub fn read_job_list(path: &Path) -> Result<Vec<JobRecord>> {
    let read_err = |e: std::io::Error| SeriesError::FileReadError {
        path: path.display().to_string(),
        source: e,
    };

    let reader = BufReader::new(File::open(path).map_err(read_err)?);
    let mut records = Vec::new();

    for (line_no, line) in (1u64..).zip(reader.lines()) {
        let line = line.map_err(read_err)?;
        if line.trim().is_empty() {
            continue;
        }

        let record = line
            .parse::<JobRecord>()
            .map_err(|reason| SeriesError::ParseError {
                path: path.display().to_string(),
                line: line_no,
                reason,
            })?;
        records.push(record);
    }

    Ok(records)
}

/// 找出第一个不连续的编号（期望值, 实际值）
pub fn find_id_gap(records: &[JobRecord]) -> Option<(u64, u64)> {
    records
        .iter()
        .zip(0u64..)
        .find(|(r, expected)| r.job_id != *expected)
        .map(|(r, expected)| (expected, r.job_id))
}

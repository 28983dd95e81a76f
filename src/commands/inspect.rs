//! # inspect 命令实现
//!
//! 读取作业列表并显示。
//!
//! ## 功能
//! - 以表格显示前 N 条记录
//! - 指定 `--task` 时只输出该数组任务对应的记录（计算节点上的查询）
//! - 检查编号是否连续
//! - 可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `jobs/joblist.rs`, `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::{Result, SeriesError};
use crate::jobs::{find_id_gap, read_job_list};
use crate::models::JobRecord;
use crate::utils::output;
use crate::utils::slurm::array_range;

use std::path::Path;
use tabled::{Table, Tabled};

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct RecordRow {
    #[tabled(rename = "Job")]
    job_id: u64,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Series")]
    series: u32,
}

impl From<&JobRecord> for RecordRow {
    fn from(r: &JobRecord) -> Self {
        RecordRow {
            job_id: r.job_id,
            file: r.file_path.clone(),
            series: r.series_index,
        }
    }
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    let records = read_job_list(&args.job_list)?;

    // 计算节点上只输出单条记录，便于脚本解析
    if let Some(task) = args.task {
        let record = find_task(&records, task).ok_or_else(|| {
            SeriesError::InvalidArgument(format!(
                "Task {} not found in {} ({} records)",
                task,
                args.job_list.display(),
                records.len()
            ))
        })?;
        println!("{}", record);
        return Ok(());
    }

    output::print_header("Job List");
    output::print_info(&format!(
        "{} records, array range {}",
        records.len(),
        array_range(records.len() as u64)
    ));

    if let Some((expected, found)) = find_id_gap(&records) {
        output::print_warning(&format!(
            "Job ids are not contiguous: expected {}, found {}",
            expected, found
        ));
    }

    if !records.is_empty() {
        let rows: Vec<RecordRow> = records.iter().take(args.top_n).map(RecordRow::from).collect();
        println!("{}", Table::new(rows));
        if records.len() > args.top_n {
            output::print_info(&format!("... {} more", records.len() - args.top_n));
        }
    }

    if let Some(ref csv_path) = args.csv {
        save_records_csv(&records, csv_path)?;
        output::print_success(&format!("Records saved to '{}'", csv_path.display()));
    }

    Ok(())
}

/// 查找数组任务对应的记录
fn find_task(records: &[JobRecord], task: u64) -> Option<&JobRecord> {
    // 编号连续时可直接按下标访问
    usize::try_from(task)
        .ok()
        .and_then(|i| records.get(i))
        .filter(|r| r.job_id == task)
        .or_else(|| records.iter().find(|r| r.job_id == task))
}

/// 保存记录到 CSV
fn save_records_csv(records: &[JobRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| SeriesError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

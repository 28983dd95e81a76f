//! # inspect 子命令 CLI 定义
//!
//! 读取已生成的作业列表，显示全部记录或某个数组任务对应的记录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the job list file
    pub job_list: PathBuf,

    /// Show only the record processed by this array task ID
    #[arg(long, env = "SLURM_ARRAY_TASK_ID")]
    pub task: Option<u64>,

    /// Number of records to print in the table
    #[arg(long, default_value_t = 20)]
    pub top_n: usize,

    /// Also export the records to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

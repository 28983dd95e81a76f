//! # generate 子命令 CLI 定义
//!
//! 遍历图像目录，生成作业列表与 Slurm 数组作业脚本
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use crate::reader::pattern::DEFAULT_PATTERNS;

use clap::Args;
use std::path::PathBuf;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Input directory; image files are searched in its subdirectories
    pub input: PathBuf,

    /// Directory where each array task writes its log file
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Worker executable (e.g. the analysis .jar) launched by each task
    #[arg(long, env = "SLURM_SERIES_WORKER")]
    pub worker: PathBuf,

    /// Properties file passed to the worker
    #[arg(long, env = "SLURM_SERIES_PROPERTIES")]
    pub properties: PathBuf,

    /// File name of the job list, written into the input directory
    #[arg(long, default_value = "Giani_Job_List.txt")]
    pub job_list: String,

    /// File name of the batch script, written into the input directory
    #[arg(long, default_value = "Giani_Slurm_Script.sh")]
    pub script: String,

    /// Image file patterns (comma-separated, case-insensitive)
    #[arg(long, default_value = DEFAULT_PATTERNS)]
    pub pattern: String,

    // ─────────────────────────────────────────────────────────────
    // Slurm options
    // ─────────────────────────────────────────────────────────────
    /// Slurm job name
    #[arg(long, default_value = "fiji-giani")]
    pub job_name: String,

    /// Time limit per array task (e.g., '1:00:00')
    #[arg(long, default_value = "1:00:00")]
    pub time: String,

    /// CPUs per array task
    #[arg(long, default_value_t = 16)]
    pub cpus_per_task: u32,

    /// Modules to load (comma-separated)
    #[arg(long, default_value = "Java/1.9.0.4")]
    pub modules: String,

    /// Command used to launch the worker
    #[arg(long, default_value = "java -jar")]
    pub launcher: String,

    /// Prefix of each task's log file name
    #[arg(long, default_value = "giani_log_ID_")]
    pub log_prefix: String,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Submit the script with sbatch after generation
    #[arg(long, default_value_t = false)]
    pub submit: bool,
}

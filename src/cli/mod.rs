//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 生成作业列表与数组作业脚本
//! - `inspect`: 查看作业列表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, inspect

pub mod generate;
pub mod inspect;

use clap::{Parser, Subcommand};

/// slurm-series - 多 series 图像的 Slurm 数组作业生成器
#[derive(Parser)]
#[command(name = "slurm-series")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Build Slurm array-job lists and submission scripts from multi-series image directories",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate (file, series) work units and write the job list and sbatch script
    Generate(generate::GenerateArgs),

    /// Show the records of a generated job list
    Inspect(inspect::InspectArgs),
}

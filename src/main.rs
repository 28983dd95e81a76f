//! # slurm-series - 多 series 图像的 Slurm 数组作业生成器
//!
//! 遍历图像目录，把每个 (文件, series) 工作单元编号写入作业列表，
//! 再生成数组范围与作业数一致的 sbatch 脚本。
//!
//! ## 子命令
//! - `generate` - 生成作业列表与数组作业脚本
//! - `inspect`  - 查看作业列表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── jobs/      (目录遍历与作业列表)
//!   │     ├── reader/    (图像读取接口)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出、报告、输出文件、Slurm 脚本)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod jobs;
mod models;
mod reader;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::report::{ConsoleReporter, Reporter};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        ConsoleReporter::new().error(&e.to_string());
        std::process::exit(1);
    }
}

//! # 工具函数模块
//!
//! 提供美化输出、进度条、运行报告、输出文件与 Slurm 脚本生成等工具。
//!
//! ## 依赖关系
//! - 被 `jobs/` 与 `commands/` 模块使用
//! - 子模块: output, output_file, progress, report, slurm

pub mod output;
pub mod output_file;
pub mod progress;
pub mod report;
pub mod slurm;

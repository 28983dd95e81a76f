//! # 作业枚举模块
//!
//! 遍历输入目录产生 (文件, series) 工作单元，并写成作业列表。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `reader/`, `models/`, `utils/`
//! - 子模块: walker, joblist

pub mod joblist;
pub mod walker;

pub use joblist::{find_id_gap, read_job_list, write_job_list, JobListSummary};
pub use walker::DirectoryWalker;

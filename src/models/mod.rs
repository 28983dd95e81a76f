//! # 数据模型模块
//!
//! 定义工作单元与作业记录。
//!
//! ## 依赖关系
//! - 被 `reader/`、`jobs/` 和 `commands/` 使用
//! - 子模块: job

pub mod job;

pub use job::{JobRecord, WorkUnit};

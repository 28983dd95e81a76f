//! # Slurm 数组作业脚本生成工具
//!
//! 根据作业数量生成 sbatch 数组作业脚本，并可调用 `sbatch` 提交。
//! 数组范围为 `0-{jobCount-1}`；作业数为 0 时保留字面量 `0--1`。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `jobs/joblist.rs` 的 `JobListSummary`

use crate::error::{Result, SeriesError};
use crate::jobs::JobListSummary;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 每个数组任务读取的环境变量
pub const ARRAY_TASK_ID_VAR: &str = "$SLURM_ARRAY_TASK_ID";

/// 脚本中的固定字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate {
    pub job_name: String,
    pub time_limit: String,
    pub cpus_per_task: u32,
    /// 每项渲染为一行 `ml <module>`
    pub modules: Vec<String>,
    /// 启动 worker 的命令前缀
    pub launcher: String,
    /// 每个任务日志文件名前缀
    pub log_prefix: String,
}

impl Default for ScriptTemplate {
    fn default() -> Self {
        ScriptTemplate {
            job_name: "fiji-giani".to_string(),
            time_limit: "1:00:00".to_string(),
            cpus_per_task: 16,
            modules: vec!["Java/1.9.0.4".to_string()],
            launcher: "java -jar".to_string(),
            log_prefix: "giani_log_ID_".to_string(),
        }
    }
}

/// 数组作业脚本配置
///
/// 只能由写入完成的作业列表概要构造，保证 `job_count` 与列表长度一致。
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    pub output_location: PathBuf,
    pub worker_executable: PathBuf,
    pub job_list_file: PathBuf,
    pub properties_file: PathBuf,
    job_count: u64,
    pub template: ScriptTemplate,
}

impl ScriptConfig {
    pub fn new(
        job_list: &JobListSummary,
        output_location: &Path,
        worker_executable: &Path,
        properties_file: &Path,
        template: ScriptTemplate,
    ) -> Self {
        ScriptConfig {
            output_location: output_location.to_path_buf(),
            worker_executable: worker_executable.to_path_buf(),
            job_list_file: job_list.path.clone(),
            properties_file: properties_file.to_path_buf(),
            job_count: job_list.job_count,
            template,
        }
    }

    pub fn job_count(&self) -> u64 {
        self.job_count
    }
}

/// 数组范围 `0-{jobCount-1}`
pub fn array_range(job_count: u64) -> String {
    // 0 个作业得到 "0--1"
    format!("0-{}", i128::from(job_count) - 1)
}

/// 生成 sbatch 数组作业脚本内容
pub fn generate_array_script(config: &ScriptConfig) -> String {
    let template = &config.template;

    let module_loads: String = template
        .modules
        .iter()
        .map(|m| format!("ml {}\n", m))
        .collect();

    let log_path = config
        .output_location
        .join(format!("{}{}.txt", template.log_prefix, ARRAY_TASK_ID_VAR));

    format!(
        r#"#!/bin/bash

#SBATCH --job-name={}
#SBATCH --time={}
#SBATCH --cpus-per-task={}
#SBATCH --array={}

{}srun --output={} {} {} {} {} {}
"#,
        template.job_name,
        template.time_limit,
        template.cpus_per_task,
        array_range(config.job_count),
        module_loads,
        log_path.display(),
        template.launcher,
        config.worker_executable.display(),
        config.job_list_file.display(),
        config.properties_file.display(),
        ARRAY_TASK_ID_VAR,
    )
}

/// 校验 Slurm 时间格式
///
/// 接受 `M`, `M:S`, `H:M:S`, `D-H`, `D-H:M`, `D-H:M:S`
pub fn validate_time_limit(time: &str) -> Result<()> {
    let pattern = Regex::new(r"^(\d+-\d+(:\d{1,2}){0,2}|\d+(:\d{1,2}){0,2})$")
        .map_err(|e| SeriesError::InvalidArgument(e.to_string()))?;

    if pattern.is_match(time.trim()) {
        Ok(())
    } else {
        Err(SeriesError::InvalidArgument(format!(
            "Invalid time limit '{}', expected e.g. '1:00:00' or '2-00:00:00'",
            time
        )))
    }
}

/// 调用 sbatch 提交脚本，返回 sbatch 的标准输出
pub fn submit_script(script: &Path) -> Result<String> {
    let workdir = script.parent().unwrap_or_else(|| Path::new("."));

    let out = Command::new("sbatch")
        .arg(script)
        .current_dir(workdir)
        .output()
        .map_err(|_| SeriesError::CommandNotFound {
            command: "sbatch".to_string(),
        })?;

    if out.status.success() {
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    } else {
        Err(SeriesError::CommandFailed {
            command: format!("sbatch {}", script.display()),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

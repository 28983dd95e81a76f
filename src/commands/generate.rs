//! # generate 命令实现
//!
//! 遍历输入目录，生成作业列表和 Slurm 数组作业脚本。
//!
//! ## 流程
//! 1. 校验输入目录（不是目录则不产生任何输出）
//! 2. 创建作业列表文件，边遍历边写入
//! 3. 作业数确定后生成数组作业脚本
//! 4. 可选调用 sbatch 提交
//!
//! 两个输出文件各自独立；脚本写入失败时作业列表仍保留在磁盘上。
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `jobs/`, `reader/`, `utils/`

use crate::cli::generate::GenerateArgs;
use crate::error::{Result, SeriesError};
use crate::jobs::{write_job_list, DirectoryWalker};
use crate::models::JobRecord;
use crate::reader::{ImageReader, PatternReader};
use crate::utils::output_file::OutputFile;
use crate::utils::report::{ConsoleReporter, Reporter};
use crate::utils::slurm::{
    array_range, generate_array_script, submit_script, validate_time_limit, ScriptConfig,
    ScriptTemplate,
};
use crate::utils::{output, progress};

use std::path::PathBuf;

/// 一次生成运行的输入
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub worker: PathBuf,
    pub properties: PathBuf,
    /// 作业列表文件名（位于输入目录）
    pub job_list_name: String,
    /// 脚本文件名（位于输入目录）
    pub script_name: String,
    pub template: ScriptTemplate,
}

/// 一次生成运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub job_list: PathBuf,
    pub script: PathBuf,
    pub job_count: u64,
}

/// 执行 generate 命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    output::print_header("Slurm Array Job Generation");

    let request = build_request(&args)?;
    let reader = PatternReader::from_patterns(&args.pattern)?;

    let spinner = progress::create_spinner("work units");
    let reporter = ConsoleReporter::with_spinner(spinner.clone());
    reporter.info(&format!("Scanning '{}'...", request.input_dir.display()));

    let outcome = run(&request, &reader, &reporter, |_| spinner.inc(1));
    spinner.finish_and_clear();
    let outcome = outcome?;

    finish_run(&outcome, args.submit, &reporter)
}

/// 报告生成结果，可选提交，最后输出 `Done.`
fn finish_run(outcome: &RunOutcome, submit: bool, reporter: &dyn Reporter) -> Result<()> {
    reporter.success(&format!("job list -> {}", outcome.job_list.display()));
    reporter.success(&format!("script -> {}", outcome.script.display()));
    reporter.info(&format!(
        "{} jobs, array range {}",
        outcome.job_count,
        array_range(outcome.job_count)
    ));

    if submit {
        let msg = submit_script(&outcome.script)?;
        reporter.success(&format!("Submitted: {}", msg));
    }

    reporter.done("Done.");
    Ok(())
}

/// 由命令行参数构造运行请求
fn build_request(args: &GenerateArgs) -> Result<RunRequest> {
    validate_time_limit(&args.time)?;

    if args.cpus_per_task == 0 {
        return Err(SeriesError::InvalidArgument(
            "--cpus-per-task must be at least 1".to_string(),
        ));
    }

    for name in [&args.job_list, &args.script] {
        if name.is_empty() || name.contains(std::path::MAIN_SEPARATOR) {
            return Err(SeriesError::InvalidArgument(format!(
                "Output name '{}' must be a plain file name",
                name
            )));
        }
    }

    let modules = args
        .modules
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(RunRequest {
        input_dir: args.input.clone(),
        output_dir: args.output_dir.clone(),
        worker: args.worker.clone(),
        properties: args.properties.clone(),
        job_list_name: args.job_list.clone(),
        script_name: args.script.clone(),
        template: ScriptTemplate {
            job_name: args.job_name.clone(),
            time_limit: args.time.clone(),
            cpus_per_task: args.cpus_per_task,
            modules,
            launcher: args.launcher.clone(),
            log_prefix: args.log_prefix.clone(),
        },
    })
}

/// 生成作业列表与脚本
///
/// `on_record` 在每条记录写入后调用（用于进度显示）。
pub fn run<R, F>(
    request: &RunRequest,
    reader: &R,
    reporter: &dyn Reporter,
    on_record: F,
) -> Result<RunOutcome>
where
    R: ImageReader,
    F: FnMut(&JobRecord),
{
    let walker = DirectoryWalker::new(&request.input_dir, reader, reporter)?;

    let job_list_file = OutputFile::create(&walker.root().join(&request.job_list_name))?;
    let summary = write_job_list(walker.units(), job_list_file, on_record)?;

    let config = ScriptConfig::new(
        &summary,
        &request.output_dir,
        &request.worker,
        &request.properties,
        request.template.clone(),
    );

    if config.job_count() == 0 {
        reporter.warning(&format!(
            "No work units found; the script keeps the array range '{}'",
            array_range(0)
        ));
    }

    let mut script_file = OutputFile::create(&walker.root().join(&request.script_name))?;
    script_file.write_str(&generate_array_script(&config))?;
    let script = script_file.finish()?;

    Ok(RunOutcome {
        job_list: summary.path,
        script,
        job_count: summary.job_count,
    })
}

//! # 运行报告器
//!
//! 各组件通过注入的 `Reporter` 输出信息、警告与诊断，
//! 而不是写入进程级的全局日志目标。
//!
//! ## 依赖关系
//! - 被 `jobs/`、`commands/` 和 `main.rs` 使用
//! - 使用 `utils/output.rs` 输出彩色消息

use crate::utils::output;
use indicatif::ProgressBar;

/// 报告通道
pub trait Reporter {
    /// 一般信息
    fn info(&self, msg: &str);

    /// 成功完成的步骤
    fn success(&self, msg: &str);

    /// 可恢复的问题（例如跳过某个文件）
    fn warning(&self, msg: &str);

    /// 终止运行的诊断
    fn error(&self, msg: &str);

    /// 运行完成
    fn done(&self, msg: &str);
}

/// 控制台报告器
///
/// 如果附带了 spinner，输出时会暂停它以免终端行交错。
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    pub fn with_spinner(spinner: ProgressBar) -> Self {
        Self {
            spinner: Some(spinner),
        }
    }

    fn emit(&self, f: impl FnOnce()) {
        match &self.spinner {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, msg: &str) {
        self.emit(|| output::print_info(msg));
    }

    fn success(&self, msg: &str) {
        self.emit(|| output::print_success(msg));
    }

    fn warning(&self, msg: &str) {
        self.emit(|| output::print_warning(msg));
    }

    fn error(&self, msg: &str) {
        self.emit(|| output::print_error(msg));
    }

    fn done(&self, msg: &str) {
        self.emit(|| output::print_done(msg));
    }
}

/// 消息级别
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
    Done,
}

/// 记录所有消息的报告器（测试用）
#[cfg(test)]
#[derive(Default)]
pub struct MemoryReporter {
    messages: std::cell::RefCell<Vec<(Level, String)>>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, msg: &str) {
        self.messages.borrow_mut().push((level, msg.to_string()));
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn success(&self, msg: &str) {
        self.push(Level::Success, msg);
    }

    fn warning(&self, msg: &str) {
        self.push(Level::Warning, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }

    fn done(&self, msg: &str) {
        self.push(Level::Done, msg);
    }
}

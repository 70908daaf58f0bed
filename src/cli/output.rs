use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;

/// 控制台输出，静默模式下只保留检查结果和错误
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// 普通提示信息
    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// 无论是否静默都输出（dry run 结果）
    pub fn always(&self, message: impl Display) {
        println!("{message}");
    }

    /// 错误信息，与原有工具一致输出到标准输出
    pub fn error(&self, message: impl Display) {
        println!("!!! {message}");
    }

    /// 下载进度条，静默模式下隐藏
    pub fn progress_bar(&self, total: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        let reporter = Reporter::new(true);
        assert!(reporter.is_quiet());
        assert!(reporter.progress_bar(100).is_hidden());
    }

    #[test]
    fn test_default_is_verbose() {
        assert!(!Reporter::default().is_quiet());
    }
}

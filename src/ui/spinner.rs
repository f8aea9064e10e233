// ============================================================================
// LocSync - Spinner 加载动画组件
// ============================================================================
//
// 文件: src/ui/spinner.rs
// 职责: 长时间等待时的终端加载动画
// 边界:
//   - ✅ 加载动画显示和控制
//   - ✅ 非 TTY / 关闭进度时静默
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含等待逻辑本身
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::utils::constants::spinner_chars;

/// 基于 indicatif 的 Spinner，drop 时自动清除
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// 启动 Spinner；未启用或 stdout 不是终端时不显示任何内容
    pub fn start(enabled: bool, message: impl Into<String>) -> Self {
        if !enabled || !atty::is(atty::Stream::Stdout) {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(&format!("{} ", spinner_chars::BASE));
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {}
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_hidden() {
        let spinner = Spinner::start(false, "waiting");
        assert!(spinner.bar.is_none());
        spinner.finish();
    }
}

// ============================================================================
// LocSync - 远端调用限速器
// ============================================================================
//
// 文件: src/core/rate_limiter.rs
// 职责: 按调用类别保证远端调用的最小间隔
// 边界:
//   - ✅ 各调用类别独立的上次调用时间
//   - ✅ 间隔不足时等待
//   - ❌ 不应包含远端调用本身
//   - ❌ 不应跨进程持久化状态
//
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::debug;

use crate::models::config::RateLimitConfig;

/// 远端调用类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    AddLanguage,
    Download,
    Upload,
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationClass::AddLanguage => write!(f, "add-language"),
            OperationClass::Download => write!(f, "download"),
            OperationClass::Upload => write!(f, "upload"),
        }
    }
}

/// 各类别的最小调用间隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub add_language: Duration,
    pub download: Duration,
    pub upload: Duration,
}

impl RateLimits {
    /// 不限速，用于测试
    pub fn none() -> Self {
        Self {
            add_language: Duration::ZERO,
            download: Duration::ZERO,
            upload: Duration::ZERO,
        }
    }

    pub fn interval(&self, class: OperationClass) -> Duration {
        match class {
            OperationClass::AddLanguage => self.add_language,
            OperationClass::Download => self.download,
            OperationClass::Upload => self.upload,
        }
    }
}

impl From<&RateLimitConfig> for RateLimits {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            add_language: Duration::from_secs(config.add_language),
            download: Duration::from_secs(config.download),
            upload: Duration::from_secs(config.upload),
        }
    }
}

/// 限速器，生命周期为一次同步
///
/// 调用远端前 `wait_if_needed`，返回后（无论成败）立即 `mark`。
/// 时间来自 `tokio::time`，测试中可暂停并自动推进。
#[derive(Debug)]
pub struct RateLimiter {
    limits: RateLimits,
    last_call: Mutex<HashMap<OperationClass, Instant>>,
}

impl RateLimiter {
    pub fn new(limits: RateLimits) -> Self {
        Self {
            limits,
            last_call: Mutex::new(HashMap::new()),
        }
    }

    pub fn interval(&self, class: OperationClass) -> Duration {
        self.limits.interval(class)
    }

    /// 距离该类别可再次调用还需等待的时间
    pub fn remaining(&self, class: OperationClass) -> Duration {
        match self.deadline(class) {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    /// 等待到该类别上次调用之后至少一个间隔；首次调用不等待
    pub async fn wait_if_needed(&self, class: OperationClass) -> Duration {
        let Some(deadline) = self.deadline(class) else {
            return Duration::ZERO;
        };
        let now = Instant::now();
        if deadline <= now {
            return Duration::ZERO;
        }
        let waited = deadline - now;
        debug!("rate limit: waiting {:?} before next {} call", waited, class);
        sleep_until(deadline).await;
        waited
    }

    /// 无条件等待一个完整间隔
    pub async fn wait_full(&self, class: OperationClass) {
        let interval = self.interval(class);
        if !interval.is_zero() {
            debug!("rate limit: pausing a full {} interval ({:?})", class, interval);
            sleep(interval).await;
        }
    }

    /// 记录该类别的调用时间
    pub fn mark(&self, class: OperationClass) {
        if let Ok(mut last_call) = self.last_call.lock() {
            last_call.insert(class, Instant::now());
        }
    }

    fn deadline(&self, class: OperationClass) -> Option<Instant> {
        let last_call = self.last_call.lock().ok()?;
        last_call.get(&class).map(|last| *last + self.interval(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RateLimits {
        RateLimits {
            add_language: Duration::from_secs(2),
            download: Duration::from_secs(2),
            upload: Duration::from_secs(20),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_never_waits() {
        let limiter = RateLimiter::new(limits());
        let start = Instant::now();
        let waited = limiter.wait_if_needed(OperationClass::Upload).await;
        assert_eq!(waited, Duration::ZERO);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_full_interval_after_mark() {
        let limiter = RateLimiter::new(limits());
        limiter.mark(OperationClass::Upload);
        let start = Instant::now();
        limiter.wait_if_needed(OperationClass::Upload).await;
        assert!(start.elapsed() >= Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_waits_the_remaining_time() {
        let limiter = RateLimiter::new(limits());
        limiter.mark(OperationClass::Upload);
        tokio::time::advance(Duration::from_secs(15)).await;

        assert_eq!(limiter.remaining(OperationClass::Upload), Duration::from_secs(5));
        let waited = limiter.wait_if_needed(OperationClass::Upload).await;
        assert_eq!(waited, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_once_interval_elapsed() {
        let limiter = RateLimiter::new(limits());
        limiter.mark(OperationClass::Download);
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(limiter.wait_if_needed(OperationClass::Download).await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_classes_are_independent() {
        let limiter = RateLimiter::new(limits());
        limiter.mark(OperationClass::Upload);
        let start = Instant::now();
        limiter.wait_if_needed(OperationClass::AddLanguage).await;
        limiter.wait_if_needed(OperationClass::Download).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.remaining(OperationClass::Upload), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_full_ignores_history() {
        let limiter = RateLimiter::new(limits());
        let start = Instant::now();
        limiter.wait_full(OperationClass::Upload).await;
        assert_eq!(start.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cadence_over_a_loop() {
        let limiter = RateLimiter::new(limits());
        let start = Instant::now();
        for _ in 0..3 {
            limiter.wait_if_needed(OperationClass::AddLanguage).await;
            limiter.mark(OperationClass::AddLanguage);
        }
        // 三次调用只在两次之间等待
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn test_limits_from_config() {
        let limits = RateLimits::from(&RateLimitConfig::default());
        assert_eq!(limits.interval(OperationClass::Upload), Duration::from_secs(20));
        assert_eq!(limits.interval(OperationClass::AddLanguage), Duration::from_secs(2));
    }
}

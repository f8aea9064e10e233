// ============================================================================
// LocSync - 瞬时错误重试
// ============================================================================
//
// 文件: src/core/retry.rs
// 职责: 对瞬时网络错误进行有限次数的指数退避重试
// 边界:
//   - ✅ 重试次数与退避时间计算
//   - ✅ 按谓词判断是否重试
//   - ❌ 不应包含限速逻辑（由调用方在每次尝试中处理）
//
// ============================================================================

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 重试策略
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// 最大尝试次数（含首次）
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }

    /// 第 attempt 次尝试前的等待时间（从 0 开始）
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi((attempt - 1) as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// 执行操作，仅在 should_retry 返回 true 时重试
pub async fn with_retry_if<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;
    loop {
        let delay = policy.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!("{}: retry {}/{} after {:?}", operation_name, attempt + 1, policy.max_attempts, delay);
            sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempt += 1;
                if !should_retry(&e) || attempt >= policy.max_attempts {
                    return Err(e);
                }
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying",
                    operation_name, attempt, policy.max_attempts, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_calculation() {
        let policy = RetryPolicy::new(5);
        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_retryable_errors_until_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = with_retry_if(
            &RetryPolicy::new(3),
            "test",
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("timeout")
                } else {
                    Ok(7)
                }
            },
            |_| true,
        )
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = with_retry_if(
            &RetryPolicy::new(3),
            "test",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("timeout")
            },
            |_| true,
        )
        .await;
        assert_eq!(result, Err("timeout"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_fails_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = with_retry_if(
            &RetryPolicy::new(3),
            "test",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("rejected")
            },
            |e| *e != "rejected",
        )
        .await;
        assert_eq!(result, Err("rejected"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_timing() {
        let start = tokio::time::Instant::now();
        let _: Result<(), &str> =
            with_retry_if(&RetryPolicy::new(3), "test", || async { Err("timeout") }, |_| true).await;
        // 1s + 2s
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}

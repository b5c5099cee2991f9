use std::time::Duration;

use crate::AppState;
use crate::cache::{DrainLockOperations, RateLimitOperations, TaskQueueOperations};
use crate::tasks::sink;

/// 连续失败退避的上限
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// 触发一次用户积压排空
///
/// 排空在独立任务中运行，调用方不等待。排空循环受按用户的
/// Redis 锁保护：该用户已有循环在运行时本次触发直接返回。
pub fn spawn_drain(state: AppState, user_id: String) {
    tokio::spawn(async move {
        let locks = DrainLockOperations::new(state.redis.clone());
        let lease_millis = state.config.drain_lease().as_millis() as u64;

        let token = match locks.acquire(&user_id, lease_millis).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("Drain loop already active for user {}", user_id);
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to acquire drain lock for user {}: {}", user_id, e);
                return;
            }
        };

        run_drain_loop(&state, &user_id, &token).await;

        if let Err(e) = locks.release(&user_id, &token).await {
            tracing::warn!("Failed to release drain lock for user {}: {}", user_id, e);
        }
    });
}

/// 单轮排空的结果
enum StepOutcome {
    /// 成功取出并执行了一个积压任务
    Drained,
    /// 受限，或标记已被其他循环取走，等待下一轮
    Waiting,
    /// 积压为空，循环结束
    Empty,
}

async fn run_drain_loop(state: &AppState, user_id: &str, token: &str) {
    let limiter = RateLimitOperations::new(
        state.redis.clone(),
        state.config.rate_limit_per_second,
        state.config.rate_limit_per_minute,
    );
    let queue = TaskQueueOperations::new(state.redis.clone());
    let locks = DrainLockOperations::new(state.redis.clone());

    let interval = state.config.drain_interval();
    let lease_millis = state.config.drain_lease().as_millis() as u64;
    let cutoff = state.config.drain_failure_cutoff;
    let mut failures: u32 = 0;

    tracing::info!("Drain loop started for user {}", user_id);

    loop {
        match drain_step(&limiter, &queue, state, user_id).await {
            Ok(StepOutcome::Drained) | Ok(StepOutcome::Waiting) => {
                failures = 0;
            }
            Ok(StepOutcome::Empty) => {
                tracing::info!("Queue is empty for user {}. Stopping drain loop.", user_id);
                return;
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(
                    "Drain iteration failed for user {} ({}/{}): {}",
                    user_id,
                    failures,
                    cutoff,
                    e
                );
                if failures >= cutoff {
                    tracing::error!(
                        "Giving up drain loop for user {} after {} consecutive failures",
                        user_id,
                        failures
                    );
                    return;
                }
            }
        }

        // 锁随循环续约；续约失败只记录，锁过期后允许新的循环接手
        if let Err(e) = locks.refresh(user_id, token, lease_millis).await {
            tracing::warn!("Failed to refresh drain lock for user {}: {}", user_id, e);
        }

        tokio::time::sleep(backoff_delay(interval, failures)).await;
    }
}

async fn drain_step(
    limiter: &RateLimitOperations,
    queue: &TaskQueueOperations,
    state: &AppState,
    user_id: &str,
) -> Result<StepOutcome, redis::RedisError> {
    if queue.len(user_id).await? == 0 {
        return Ok(StepOutcome::Empty);
    }

    if !limiter.try_admit(user_id).await? {
        return Ok(StepOutcome::Waiting);
    }

    match queue.pop_front(user_id).await? {
        Some(_marker) => {
            // 标记已消费；副作用失败只记录，不回退队列
            if let Err(e) = sink::execute(&state.config.task_log_path, user_id).await {
                tracing::warn!("Task completion failed for user {}: {}", user_id, e);
            }
            Ok(StepOutcome::Drained)
        }
        // 长度检查和出队之间标记可能已被取走，按空轮处理
        None => Ok(StepOutcome::Waiting),
    }
}

/// 正常轮询使用固定间隔，连续失败时线性退避并封顶
fn backoff_delay(interval: Duration, failures: u32) -> Duration {
    if failures == 0 {
        return interval;
    }
    interval.saturating_mul(failures + 1).min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_failures_keeps_fixed_interval() {
        let interval = Duration::from_secs(1);
        assert_eq!(backoff_delay(interval, 0), interval);
    }

    #[test]
    fn backoff_grows_linearly_with_failures() {
        let interval = Duration::from_secs(1);
        assert_eq!(backoff_delay(interval, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(interval, 2), Duration::from_secs(3));
        assert_eq!(backoff_delay(interval, 4), Duration::from_secs(5));
    }

    #[test]
    fn backoff_is_capped() {
        let interval = Duration::from_secs(10);
        assert_eq!(backoff_delay(interval, 100), MAX_BACKOFF);
    }
}

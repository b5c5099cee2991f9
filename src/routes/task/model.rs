use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::cache::{RateLimitOperations, TaskQueueOperations};
use crate::tasks::{drain, sink};
use crate::utils::now_millis;

#[derive(Debug, Deserialize)]
pub struct SubmitTaskRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitTaskResponse {
    pub status: String,
}

/// 提交的最终去向
#[derive(Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 通过限流检查，任务已同步执行
    Completed,
    /// 触发限流，任务已入队等待异步排空
    Deferred,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("task store unavailable: {0}")]
    Store(#[from] redis::RedisError),
    #[error("task completion failed: {0}")]
    Completion(#[from] std::io::Error),
}

pub struct TaskSubmission;

impl TaskSubmission {
    /// 处理一次任务提交：限流放行则立即执行，
    /// 否则入队并触发该用户的积压排空
    pub async fn submit(
        state: &AppState,
        user_id: &str,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let limiter = RateLimitOperations::new(
            state.redis.clone(),
            state.config.rate_limit_per_second,
            state.config.rate_limit_per_minute,
        );

        if limiter.try_admit(user_id).await? {
            sink::execute(&state.config.task_log_path, user_id).await?;
            return Ok(SubmissionOutcome::Completed);
        }

        let queue = TaskQueueOperations::new(state.redis.clone());
        queue.push_back(user_id, now_millis()).await?;

        // 不等待排空完成，提交方立即收到已入队的应答
        drain::spawn_drain(state.clone(), user_id.to_string());

        Ok(SubmissionOutcome::Deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_defaults_to_empty_when_absent() {
        let req: SubmitTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id, "");
    }

    #[test]
    fn user_id_is_taken_verbatim_when_present() {
        let req: SubmitTaskRequest = serde_json::from_str(r#"{"user_id":"alice"}"#).unwrap();
        assert_eq!(req.user_id, "alice");
    }
}

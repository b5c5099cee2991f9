use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::queue_key;

/// 积压队列操作
/// 按用户的 Redis 列表，队尾入队、队头出队，保持 FIFO
pub struct TaskQueueOperations {
    redis_client: Arc<RedisClient>,
}

impl TaskQueueOperations {
    /// 创建新的积压队列操作实例
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }

    /// 将延迟任务标记追加到队尾
    pub async fn push_back(
        &self,
        user_id: &str,
        deferred_at: i64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.rpush(queue_key(user_id), deferred_at).await?;
        Ok(())
    }

    /// 从队头取出一个标记，队列为空时返回 None
    pub async fn pop_front(&self, user_id: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let marker: Option<String> = conn.lpop(queue_key(user_id), None).await?;
        Ok(marker)
    }

    /// 查询当前积压长度
    pub async fn len(&self, user_id: &str) -> Result<u64, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let len: u64 = conn.llen(queue_key(user_id)).await?;
        Ok(len)
    }
}

use std::sync::Arc;

use redis::Client as RedisClient;
use uuid::Uuid;

use crate::cache::keys::drain_lock_key;

/// 续约脚本：仅当仍持有锁（令牌匹配）时延长过期时间
const REFRESH_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('PEXPIRE', KEYS[1], ARGV[2])
end
return 0
"#;

/// 释放脚本：仅当仍持有锁（令牌匹配）时删除，
/// 避免误删过期后被其他循环重新获取的锁
const RELEASE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// 排空锁操作
/// 同一用户同一时刻至多一个排空循环持有锁
pub struct DrainLockOperations {
    redis_client: Arc<RedisClient>,
}

impl DrainLockOperations {
    /// 创建新的排空锁操作实例
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }

    /// 尝试获取用户的排空锁，成功时返回持有者令牌
    pub async fn acquire(
        &self,
        user_id: &str,
        ttl_millis: u64,
    ) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let token = Uuid::new_v4().to_string();
        let acquired: Option<String> = redis::cmd("SET")
            .arg(drain_lock_key(user_id))
            .arg(&token)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis)
            .query_async(&mut conn)
            .await?;

        Ok(acquired.map(|_| token))
    }

    /// 为仍然持有的锁续约，返回是否续约成功
    pub async fn refresh(
        &self,
        user_id: &str,
        token: &str,
        ttl_millis: u64,
    ) -> Result<bool, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let refreshed: i32 = redis::Script::new(REFRESH_SCRIPT)
            .key(drain_lock_key(user_id))
            .arg(token)
            .arg(ttl_millis)
            .invoke_async(&mut conn)
            .await?;

        Ok(refreshed == 1)
    }

    /// 释放自己持有的锁，令牌不匹配时不做任何事
    pub async fn release(&self, user_id: &str, token: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let _: i32 = redis::Script::new(RELEASE_SCRIPT)
            .key(drain_lock_key(user_id))
            .arg(token)
            .invoke_async(&mut conn)
            .await?;

        Ok(())
    }
}

use std::sync::Arc;

use redis::Client as RedisClient;
use uuid::Uuid;

use crate::cache::keys::admission_key;
use crate::utils::now_millis;

/// 准入判定脚本
/// 在服务端一次完成过期清理、双窗口计数与条件写入，
/// 两次往返之间不存在竞态窗口
const ADMIT_SCRIPT: &str = r#"
redis.call('ZREMRANGEBYSCORE', KEYS[1], '-inf', ARGV[3])

local last_second = redis.call('ZCOUNT', KEYS[1], '(' .. ARGV[2], ARGV[1])
local last_minute = redis.call('ZCOUNT', KEYS[1], '(' .. ARGV[3], ARGV[1])

if last_second >= tonumber(ARGV[4]) or last_minute >= tonumber(ARGV[5]) then
    return 0
end

redis.call('ZADD', KEYS[1], ARGV[1], ARGV[6])
return 1
"#;

/// 速率限制操作
/// 准入记录保存在按用户的有序集合里，score 为准入时间戳（毫秒）
pub struct RateLimitOperations {
    redis_client: Arc<RedisClient>,
    per_second: u32,
    per_minute: u32,
}

impl RateLimitOperations {
    /// 创建新的速率限制操作实例
    pub fn new(redis_client: Arc<RedisClient>, per_second: u32, per_minute: u32) -> Self {
        Self {
            redis_client,
            per_second,
            per_minute,
        }
    }

    /// 判断用户当前是否允许执行任务，允许时同步记录本次准入
    ///
    /// 两个滑动窗口均为左开右闭：(now-1s, now] 与 (now-60s, now]，
    /// 任一窗口达到上限即拒绝且不写入。
    pub async fn try_admit(&self, user_id: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let now = now_millis();
        // 同一毫秒的两次准入各自独立成员，不会互相覆盖
        let member = format!("{}:{}", now, Uuid::new_v4());

        let admitted: i32 = redis::Script::new(ADMIT_SCRIPT)
            .key(admission_key(user_id))
            .arg(now.to_string())
            .arg((now - 1_000).to_string())
            .arg((now - 60_000).to_string())
            .arg(self.per_second)
            .arg(self.per_minute)
            .arg(member)
            .invoke_async(&mut conn)
            .await?;

        Ok(admitted == 1)
    }
}

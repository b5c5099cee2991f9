/// 准入记录键前缀（按用户的有序集合，score 为准入时间戳）
const ADMISSION_PREFIX: &str = "tasks:";

/// 积压队列键前缀（按用户的列表，FIFO）
const QUEUE_PREFIX: &str = "queue:";

/// 排空锁键前缀
const DRAIN_LOCK_PREFIX: &str = "drain:lock:";

/// 生成用户准入记录键
pub fn admission_key(user_id: &str) -> String {
    format!("{}{}", ADMISSION_PREFIX, user_id)
}

/// 生成用户积压队列键
pub fn queue_key(user_id: &str) -> String {
    format!("{}{}", QUEUE_PREFIX, user_id)
}

/// 生成用户排空锁键
pub fn drain_lock_key(user_id: &str) -> String {
    format!("{}{}", DRAIN_LOCK_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_per_user() {
        assert_eq!(admission_key("alice"), "tasks:alice");
        assert_eq!(queue_key("alice"), "queue:alice");
        assert_eq!(drain_lock_key("alice"), "drain:lock:alice");
    }

    #[test]
    fn different_users_never_share_keys() {
        assert_ne!(admission_key("alice"), admission_key("bob"));
        assert_ne!(queue_key("alice"), queue_key("bob"));
    }
}

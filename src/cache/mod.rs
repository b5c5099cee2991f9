// 缓存模块
// 包含 Redis 键生成与存储操作

pub mod keys;
pub mod operations;

// 重新导出常用操作，方便其他模块使用
pub use operations::drain_lock::DrainLockOperations;
pub use operations::queue::TaskQueueOperations;
pub use operations::rate_limit::RateLimitOperations;

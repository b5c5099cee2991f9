/// 缓存操作
/// 提供缓存操作的功能实现

// 排空锁操作
pub mod drain_lock;

// 积压队列操作
pub mod queue;

// 速率限制操作
pub mod rate_limit;

// 重新导出常用操作
pub use drain_lock::DrainLockOperations;
pub use queue::TaskQueueOperations;
pub use rate_limit::RateLimitOperations;

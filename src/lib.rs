use std::sync::Arc;

use config::Config;
use redis::Client as RedisClient;

pub mod cache;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod tasks;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub redis: Arc<RedisClient>,
}

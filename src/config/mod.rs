use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub rate_limit_per_second: u32,
    pub rate_limit_per_minute: u32,
    pub drain_interval_secs: u64,
    pub drain_lease_secs: u64,
    pub drain_failure_cutoff: u32,
    pub task_log_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(5000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api/v1".into()),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            drain_interval_secs: env::var("DRAIN_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            drain_lease_secs: env::var("DRAIN_LEASE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            drain_failure_cutoff: env::var("DRAIN_FAILURE_CUTOFF")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            task_log_path: env::var("TASK_LOG_PATH")
                .unwrap_or_else(|_| "logs/task_log.txt".into()),
        })
    }

    pub fn drain_interval(&self) -> Duration {
        Duration::from_secs(self.drain_interval_secs)
    }

    pub fn drain_lease(&self) -> Duration {
        Duration::from_secs(self.drain_lease_secs)
    }
}

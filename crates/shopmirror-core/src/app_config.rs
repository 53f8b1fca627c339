use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    pub shops_path: PathBuf,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on shops synchronized in parallel.
    pub max_concurrent_shops: usize,
    /// Fixed delay between navigating to a detail page and reading its HTML,
    /// giving client-side rendering time to settle.
    pub render_settle_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("shops_path", &self.shops_path)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_shops", &self.max_concurrent_shops)
            .field("render_settle_delay_ms", &self.render_settle_delay_ms)
            .finish()
    }
}

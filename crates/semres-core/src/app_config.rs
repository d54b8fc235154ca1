use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote results service.
    pub service_url: String,
    /// Directory holding persisted storage keys (recent searches).
    pub data_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

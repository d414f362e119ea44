use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings shared by the CLI and the proxy.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the catalog proxy the CLI talks to, without trailing slash.
    pub api_base_url: String,
    /// Default warehouse/postal code used to scope the catalog.
    pub region: String,
    pub inter_request_delay_ms: u64,
    /// `None` leaves the HTTP client on its transport default.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub export_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Upstream catalog API the proxy forwards to.
    pub upstream_url: String,
}

impl AppConfig {
    #[must_use]
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

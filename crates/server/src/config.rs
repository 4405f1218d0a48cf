use std::time::Duration;

use clap::Parser;
use matchcount_core::domain::CounterConfig;
use matchcount_core::upstream::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Daily match counts from upstream activity history", long_about = None)]
pub struct Config {
    /// Secret key sent upstream as `X-API-Key`
    #[arg(long, env = "STATS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "STATS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_url: String,

    /// Deadline for each upstream request
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Extra attempts after an upstream transport failure
    #[arg(long, env = "UPSTREAM_RETRIES", default_value_t = 0)]
    pub upstream_retries: u32,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_timeout(Duration::from_secs(self.upstream_timeout_secs))
            .with_retries(self.upstream_retries)
    }

    pub fn counter_config(&self) -> CounterConfig {
        CounterConfig::default().with_base_url(self.upstream_url.clone())
    }
}

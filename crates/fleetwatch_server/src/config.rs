use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // HTTP configuration
    /// HTTP server host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    // ClickHouse configuration
    /// ClickHouse HTTP URL
    #[serde(default = "default_clickhouse_url")]
    pub clickhouse_url: String,

    /// ClickHouse database name
    #[serde(default = "default_clickhouse_database")]
    pub clickhouse_database: String,

    /// ClickHouse username
    #[serde(default = "default_clickhouse_username")]
    pub clickhouse_username: String,

    /// ClickHouse password
    #[serde(default = "default_clickhouse_password")]
    pub clickhouse_password: String,

    /// Telemetry table name
    #[serde(default = "default_telemetry_table")]
    pub telemetry_table: String,

    /// Lookback window for "latest" queries in seconds
    #[serde(default = "default_latest_lookback_secs")]
    pub latest_lookback_secs: u64,

    // PostgreSQL configuration
    /// PostgreSQL host
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,

    /// PostgreSQL port
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    /// PostgreSQL database name
    #[serde(default = "default_postgres_database")]
    pub postgres_database: String,

    /// PostgreSQL username
    #[serde(default = "default_postgres_username")]
    pub postgres_username: String,

    /// PostgreSQL password
    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,

    /// PostgreSQL connection pool size
    #[serde(default = "default_postgres_pool_size")]
    pub postgres_pool_size: usize,

    // Bootstrap configuration
    /// Attempts made to reach each backing store before giving up
    #[serde(default = "default_bootstrap_max_attempts")]
    pub bootstrap_max_attempts: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

// HTTP defaults
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

// ClickHouse defaults
fn default_clickhouse_url() -> String {
    "http://localhost:8123".to_string()
}

fn default_clickhouse_database() -> String {
    "fleetwatch".to_string()
}

fn default_clickhouse_username() -> String {
    "fleetwatch".to_string()
}

fn default_clickhouse_password() -> String {
    "fleetwatch".to_string()
}

fn default_telemetry_table() -> String {
    "vehicle_telemetry".to_string()
}

fn default_latest_lookback_secs() -> u64 {
    fleetwatch_clickhouse::DEFAULT_LATEST_LOOKBACK_SECS
}

// PostgreSQL defaults
fn default_postgres_host() -> String {
    "localhost".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_database() -> String {
    "fleetwatch".to_string()
}

fn default_postgres_username() -> String {
    "fleetwatch".to_string()
}

fn default_postgres_password() -> String {
    "fleetwatch".to_string()
}

fn default_postgres_pool_size() -> usize {
    5
}

// Bootstrap defaults
fn default_bootstrap_max_attempts() -> u32 {
    10
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("FLEETWATCH"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests run serially and don't interfere with each other
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        std::env::remove_var("FLEETWATCH_LOG_LEVEL");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.telemetry_table, "vehicle_telemetry");
        assert_eq!(config.latest_lookback_secs, 604_800);
    }

    #[test]
    fn test_custom_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        std::env::set_var("FLEETWATCH_LOG_LEVEL", "debug");
        std::env::set_var("FLEETWATCH_HTTP_PORT", "9100");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.http_port, 9100);

        // Clean up
        std::env::remove_var("FLEETWATCH_LOG_LEVEL");
        std::env::remove_var("FLEETWATCH_HTTP_PORT");
    }
}

//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional `config/proxy`
//! file (any format the `config` crate understands), then environment
//! variables such as `PROXY__UPSTREAM__BASE_URL`. A `.env` file is loaded into
//! the environment first by `main`.
//!
//! The upstream credential is not part of this struct. It is
//! read from `API_SECRET_KEY` on every outbound call (see `upstream`).

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for JSON request bodies (base64 images included).
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

/// Product-data service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Skip TLS certificate validation toward the upstream host.
    /// Only for upstreams with a self-signed or broken chain.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

fn default_base_url() -> String {
    "https://iscan.store".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl Config {
    /// Loads configuration from the optional config file and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/proxy").required(false))
            // PROXY__SERVER__PORT -> server.port
            .add_source(
                config::Environment::with_prefix("PROXY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_local() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upstream.base_url, "https://iscan.store");
        assert!(!config.upstream.accept_invalid_certs);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        // Only this test sets PROXY__* variables.
        std::env::set_var("PROXY__SERVER__PORT", "9090");
        std::env::set_var("PROXY__UPSTREAM__ACCEPT_INVALID_CERTS", "true");
        std::env::set_var("PROXY__UPSTREAM__BASE_URL", "https://staging.example");

        let config = Config::load().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.upstream.accept_invalid_certs);
        assert_eq!(config.upstream.base_url, "https://staging.example");
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "upstream": { "accept_invalid_certs": true }
        }))
        .unwrap();
        assert!(config.upstream.accept_invalid_certs);
        assert_eq!(config.upstream.base_url, "https://iscan.store");
        assert_eq!(config.server.port, 8080);
    }
}

//! # Application Configuration
//!
//! Configuration loaded from environment variables, validated on startup so
//! the process fails fast if misconfigured.
//!
//! Use [`core_config()`] to access the global instance after a single call to
//! [`init_config()`] at startup.

use crate::error::SwapError;
use std::env;
use std::sync::OnceLock;

/// Default public 0x-style aggregator endpoint.
const DEFAULT_AGGREGATOR_API: &str = "https://api.0x.org";

/// Default indicative price service endpoint.
const DEFAULT_PRICE_API: &str = "https://price.swapdesk.io";

/// Default JSON-RPC node (local dev node).
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the indicative price service.
    pub price_api_base: String,

    /// Base URL of the liquidity-aggregator quote service.
    pub aggregator_api_base: String,

    /// JSON-RPC endpoint of the node holding the signing account.
    pub rpc_url: String,

    /// Account on the node used as taker and transaction sender.
    ///
    /// When unset the session starts with no wallet connected and execution
    /// is rejected until one is connected.
    pub taker_address: Option<String>,

    /// HTTP request timeout in seconds for all outbound calls.
    ///
    /// Valid range: 1-120 seconds.
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All settings have working defaults so a dev setup needs no environment
    /// at all.
    pub fn from_env() -> Result<Self, SwapError> {
        let price_api_base = env::var("SWAPDESK_PRICE_API")
            .unwrap_or_else(|_| DEFAULT_PRICE_API.to_string());

        let aggregator_api_base = env::var("SWAPDESK_AGGREGATOR_API")
            .unwrap_or_else(|_| DEFAULT_AGGREGATOR_API.to_string());

        let rpc_url =
            env::var("SWAPDESK_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let taker_address = env::var("SWAPDESK_TAKER").ok();

        let http_timeout_secs = env::var("SWAPDESK_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| {
                SwapError::Config(format!("SWAPDESK_HTTP_TIMEOUT_SECS must be a number: {e}"))
            })?;

        Ok(Self {
            price_api_base,
            aggregator_api_base,
            rpc_url,
            taker_address,
            http_timeout_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), SwapError> {
        for (name, url) in [
            ("SWAPDESK_PRICE_API", &self.price_api_base),
            ("SWAPDESK_AGGREGATOR_API", &self.aggregator_api_base),
            ("SWAPDESK_RPC_URL", &self.rpc_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SwapError::Config(format!("{name} must be an http(s) URL")));
            }
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 120 {
            return Err(SwapError::Config(
                "SWAPDESK_HTTP_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// Call once at application startup, before any service that needs
/// configuration is constructed.
pub fn init_config() -> Result<(), SwapError> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| SwapError::Config("config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config {
            price_api_base: DEFAULT_PRICE_API.to_string(),
            aggregator_api_base: DEFAULT_AGGREGATOR_API.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            taker_address: None,
            http_timeout_secs: 10,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = Config {
            price_api_base: "ftp://nope".to_string(),
            aggregator_api_base: DEFAULT_AGGREGATOR_API.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            taker_address: None,
            http_timeout_secs: 10,
        };
        assert!(matches!(config.validate(), Err(SwapError::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = Config {
            price_api_base: DEFAULT_PRICE_API.to_string(),
            aggregator_api_base: DEFAULT_AGGREGATOR_API.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            taker_address: None,
            http_timeout_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}

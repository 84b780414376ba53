//! Client configuration
//!
//! Endpoint, timeout and batch pairing mode, with environment overrides and
//! endpoint validation.

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{Web3Error, Web3Result};
use crate::rpc::BatchOrdering;

/// Public Arbitrum One endpoint
pub const DEFAULT_RPC_URL: &str = "https://arb1.arbitrum.io/rpc";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_RPC_URL: &str = "WEB3CALL_RPC_URL";
pub const ENV_TIMEOUT_SECS: &str = "WEB3CALL_TIMEOUT_SECS";
pub const ENV_BATCH_ORDERING: &str = "WEB3CALL_BATCH_ORDERING";

/// Settings for [`crate::rpc::Web3Client`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub timeout: Duration,
    pub batch_ordering: BatchOrdering,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            batch_ordering: BatchOrdering::default(),
            user_agent: format!("web3call/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_batch_ordering(mut self, batch_ordering: BatchOrdering) -> Self {
        self.batch_ordering = batch_ordering;
        self
    }

    /// Defaults overlaid with `WEB3CALL_*` environment variables
    pub fn from_env() -> Web3Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Web3Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RPC_URL).filter(|v| !v.trim().is_empty()) {
            config.rpc_url = url.trim().to_string();
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Web3Error::config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(ordering) = lookup(ENV_BATCH_ORDERING) {
            config.batch_ordering = ordering.trim().parse()?;
        }

        Ok(config)
    }

    /// Check the endpoint URL and timeout
    pub fn validate(&self) -> Web3Result<()> {
        let parsed = Url::parse(&self.rpc_url)
            .map_err(|e| Web3Error::config(format!("Invalid RPC URL format: {}", e)))?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                let local = matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]"));
                if !local {
                    crate::log_warn!("config", "Plain HTTP endpoint, traffic is not encrypted", endpoint = self.rpc_url);
                }
            }
            other => {
                return Err(Web3Error::config(format!("Unsupported URL scheme: {}", other)));
            }
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(Web3Error::config("RPC URL has no host"));
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            crate::log_warn!("config", "Credentials in RPC URL, they will be sent with every request");
        }

        if self.timeout.is_zero() {
            return Err(Web3Error::config("Timeout must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.rpc_url, "https://arb1.arbitrum.io/rpc");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.batch_ordering, BatchOrdering::ById);
        assert!(config.user_agent.starts_with("web3call/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_RPC_URL, "https://rpc.example.org"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_BATCH_ORDERING, "positional"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "https://rpc.example.org");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.batch_ordering, BatchOrdering::Positional);
    }

    #[test]
    fn test_env_empty_url_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_RPC_URL, "  ")])).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_env_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "ten")])),
            Err(Web3Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_BATCH_ORDERING, "random")])),
            Err(Web3Error::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        for url in ["not a url", "ftp://rpc.example.org", "file:///tmp/rpc"] {
            assert!(
                matches!(ClientConfig::new(url).validate(), Err(Web3Error::Config(_))),
                "{} should be rejected",
                url
            );
        }
    }

    #[test]
    fn test_validate_local_http() {
        assert!(ClientConfig::new("http://127.0.0.1:8545").validate().is_ok());
        assert!(ClientConfig::new("http://localhost:8545").validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(Web3Error::Config(_))));
    }
}

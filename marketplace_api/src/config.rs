use std::{env, time::Duration};

use catalog_engine::helpers::DEFAULT_IMAGE_BASE_URL;
use log::*;
use mc_common::helpers::parse_boolean_flag;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Prefix for relative image paths returned by the API
    pub image_base_url: String,
    pub timeout: Duration,
    /// Accept self-signed certificates from the backend. **DANGER** Only for local development.
    pub accept_invalid_certs: bool,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

impl MarketplaceConfig {
    pub fn new(api_url: &str) -> Self {
        Self { api_url: api_url.trim_end_matches('/').to_string(), ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let api_url = env::var("MC_API_URL").map(|s| s.trim_end_matches('/').to_string()).unwrap_or_else(|_| {
            info!("🪛️ MC_API_URL not set, using {DEFAULT_API_URL} as default");
            DEFAULT_API_URL.to_string()
        });
        let image_base_url = env::var("MC_IMAGE_BASE_URL").unwrap_or_else(|_| {
            debug!("🪛️ MC_IMAGE_BASE_URL not set, using {DEFAULT_IMAGE_BASE_URL} as default");
            DEFAULT_IMAGE_BASE_URL.to_string()
        });
        let timeout = env::var("MC_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for MC_API_TIMEOUT_SECS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_TIMEOUT);
        let accept_invalid_certs = parse_boolean_flag(env::var("MC_API_ACCEPT_INVALID_CERTS").ok(), false);
        if accept_invalid_certs {
            warn!("🚨️ MC_API_ACCEPT_INVALID_CERTS is set. TLS certificates from the backend will not be verified.");
        }
        Self { api_url, image_base_url, timeout, accept_invalid_certs }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = MarketplaceConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.accept_invalid_certs);
        let config = MarketplaceConfig::new("https://api.example.com/api/");
        assert_eq!(config.api_url, "https://api.example.com/api");
    }
}

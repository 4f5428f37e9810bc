//! Proxy configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `MC_PROXY_HOST` | `127.0.0.1` |
//! | `MC_PROXY_PORT` | `3000` |
//! | `MC_IMAGE_BACKEND_URL` | `http://localhost:8080/api/images` |
//! | `MC_IMAGE_CACHE_SECS` | `3600` |
//! | `MC_IMAGE_TIMEOUT_SECS` | `15` |
use std::{env, time::Duration};

use log::*;

const DEFAULT_PROXY_HOST: &str = "127.0.0.1";
const DEFAULT_PROXY_PORT: u16 = 3000;
const DEFAULT_IMAGE_BACKEND_URL: &str = "http://localhost:8080/api/images";
const DEFAULT_CACHE_MAX_AGE: u64 = 3600;
const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    /// Images are fetched from `{image_backend_url}/{path}`
    pub image_backend_url: String,
    pub cache: CacheSettings,
    pub backend_timeout: Duration,
}

/// Response header settings, shared with the request handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    /// Seconds a client may cache an image for
    pub max_age: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { max_age: DEFAULT_CACHE_MAX_AGE }
    }
}

impl CacheSettings {
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROXY_HOST.to_string(),
            port: DEFAULT_PROXY_PORT,
            image_backend_url: DEFAULT_IMAGE_BACKEND_URL.to_string(),
            cache: CacheSettings::default(),
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl ProxyConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MC_PROXY_HOST").ok().unwrap_or_else(|| DEFAULT_PROXY_HOST.into());
        let port = env::var("MC_PROXY_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for MC_PROXY_PORT. {e} Using the default, {DEFAULT_PROXY_PORT}, \
                         instead."
                    );
                    DEFAULT_PROXY_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PROXY_PORT);
        let image_backend_url = env::var("MC_IMAGE_BACKEND_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .ok()
            .unwrap_or_else(|| {
                warn!("🪛️ MC_IMAGE_BACKEND_URL is not set. Using {DEFAULT_IMAGE_BACKEND_URL} as default.");
                DEFAULT_IMAGE_BACKEND_URL.to_string()
            });
        let max_age = env::var("MC_IMAGE_CACHE_SECS")
            .map_err(|_| debug!("🪛️ MC_IMAGE_CACHE_SECS is not set. Using the default of {DEFAULT_CACHE_MAX_AGE}s."))
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid configuration value for MC_IMAGE_CACHE_SECS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_CACHE_MAX_AGE);
        let backend_timeout = env::var("MC_IMAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for MC_IMAGE_TIMEOUT_SECS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT);
        Self { host, port, image_backend_url, cache: CacheSettings { max_age }, backend_timeout }
    }
}

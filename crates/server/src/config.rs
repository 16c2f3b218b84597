use anyhow::Context;
use boxy_core::types::BackendLocation;

/// Process configuration, read from the environment exactly once at startup
/// and passed down explicitly; business logic never touches ambient state.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub bind_addr: String,
    /// Set for a fixed-backend deployment; unset to delegate backend/stream
    /// locations to per-installation user config.
    pub fixed_backend: Option<BackendLocation>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let tmdb_api_key =
            std::env::var("BOXY_TMDB_API_KEY").context("BOXY_TMDB_API_KEY must be set")?;

        let bind_addr =
            std::env::var("BOXY_BIND").unwrap_or_else(|_| "0.0.0.0:10000".to_string());

        let backend_url = std::env::var("BOXY_BACKEND_URL")
            .ok()
            .filter(|v| !v.is_empty());
        let stream_url = std::env::var("BOXY_STREAM_URL")
            .ok()
            .filter(|v| !v.is_empty());

        let fixed_backend = match (backend_url, stream_url) {
            (Some(backend_url), Some(stream_url)) => Some(BackendLocation {
                backend_url,
                stream_url,
            }),
            (None, None) => None,
            _ => anyhow::bail!("BOXY_BACKEND_URL and BOXY_STREAM_URL must be set together"),
        };

        Ok(Self {
            tmdb_api_key,
            bind_addr,
            fixed_backend,
        })
    }
}

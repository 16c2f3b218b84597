//! Backend location and notification.
//!
//! The backend is a separate process that locates and prepares the actual
//! media source. This side only tells it what to fetch and hands the client
//! a pre-registered playback URL; it never waits for the backend to succeed.

use std::time::Duration;

use boxy_core::types::{BackendLocation, MediaType, UserConfig};
use boxy_metadata::MediaMetadata;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::resolver::ResolveError;

/// Fixed resource path on the backend that accepts fetch requests.
const STREAM_PATH: &str = "/stream";

/// A hung backend must not stall the client response indefinitely.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the backend and playback endpoints live for a given request.
///
/// Two deployments share one resolver: one reads the locations from the
/// per-installation user config, the other from process configuration.
pub trait BackendLocator: Send + Sync {
    /// Media types this deployment serves at all.
    fn supports(&self, media_type: MediaType) -> bool;

    /// The configuration gate: yields locations or rejects the request
    /// before any external call is made.
    fn locate(&self, config: Option<&UserConfig>) -> Result<BackendLocation, ResolveError>;
}

/// Reads backend/stream URLs from the decoded install-time user config.
/// Accepts any non-empty strings; URL shape is not validated.
pub struct UserConfigLocator;

impl BackendLocator for UserConfigLocator {
    fn supports(&self, _media_type: MediaType) -> bool {
        true
    }

    fn locate(&self, config: Option<&UserConfig>) -> Result<BackendLocation, ResolveError> {
        let config = config.ok_or(ResolveError::ConfigurationMissing)?;
        let backend_url = config.backend_url.as_deref().filter(|v| !v.is_empty());
        let stream_url = config.stream_url.as_deref().filter(|v| !v.is_empty());

        match (backend_url, stream_url) {
            (Some(backend_url), Some(stream_url)) => Ok(BackendLocation {
                backend_url: backend_url.to_string(),
                stream_url: stream_url.to_string(),
            }),
            _ => Err(ResolveError::ConfigurationMissing),
        }
    }
}

/// Serves operator-configured locations; movies only.
pub struct FixedLocator {
    location: BackendLocation,
}

impl FixedLocator {
    pub fn new(location: BackendLocation) -> Self {
        Self { location }
    }
}

impl BackendLocator for FixedLocator {
    fn supports(&self, media_type: MediaType) -> bool {
        media_type == MediaType::Movie
    }

    fn locate(&self, _config: Option<&UserConfig>) -> Result<BackendLocation, ResolveError> {
        Ok(self.location.clone())
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("backend transport error: {0}")]
    Transport(String),
}

/// What the backend needs to start locating a source.
#[derive(Serialize)]
struct NotifyPayload<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<&'a str>,
}

/// Sends the resolved title/year to the backend. Fire-and-forget: the
/// response body and status are never inspected, only transport failure is
/// reported so the caller can log it.
pub struct BackendNotifier {
    client: reqwest::Client,
}

impl BackendNotifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn notify(
        &self,
        location: &BackendLocation,
        metadata: &MediaMetadata,
    ) -> Result<(), NotifyError> {
        let url = format!("{}{STREAM_PATH}", location.backend_url.trim_end_matches('/'));
        debug!(url = %url, title = %metadata.title, "notifying backend");

        self.client
            .post(&url)
            .json(&NotifyPayload {
                title: &metadata.title,
                year: metadata.year.as_deref(),
            })
            .timeout(NOTIFY_TIMEOUT)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }
}

impl Default for BackendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

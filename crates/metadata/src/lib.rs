pub mod provider;
pub mod tmdb;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Canonical title/year pair resolved for an external identifier. Lives for
/// one request: produced by the lookup, consumed by the backend notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    /// Four-digit calendar year, absent when the provider has no date.
    pub year: Option<String>,
}

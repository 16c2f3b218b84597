//! TMDB (The Movie Database) provider client.
//!
//! Uses the TMDB API v3 `/find` endpoint: https://developer.themoviedb.org/docs

use std::time::Duration;

use tracing::debug;

use crate::provider::MetadataProvider;
use crate::{MediaMetadata, MetadataError};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// One attempt per lookup, no retries; a slow provider must not pin the
/// request handler for longer than this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<MediaMetadata, MetadataError> {
        let data = self
            .get_json(
                &format!("/find/{external_id}"),
                &[("external_source", "imdb_id")],
            )
            .await?;

        parse_find_response(&data).ok_or(MetadataError::NotFound)
    }
}

/// Pick the best match out of a `/find` response: the top-ranked movie when
/// any movie matched, otherwise the top-ranked series, otherwise nothing.
fn parse_find_response(data: &serde_json::Value) -> Option<MediaMetadata> {
    if let Some(movie) = data["movie_results"].as_array().and_then(|r| r.first()) {
        return Some(MediaMetadata {
            title: movie["title"].as_str().unwrap_or("Unknown").to_string(),
            year: extract_year(movie["release_date"].as_str()),
        });
    }

    if let Some(series) = data["tv_results"].as_array().and_then(|r| r.first()) {
        return Some(MediaMetadata {
            title: series["name"].as_str().unwrap_or("Unknown").to_string(),
            year: extract_year(series["first_air_date"].as_str()),
        });
    }

    None
}

/// The 4-character year prefix of a `YYYY-MM-DD` date, or nothing. An empty
/// or truncated date is not an error.
fn extract_year(date: Option<&str>) -> Option<String> {
    date.and_then(|d| d.get(..4)).map(|y| y.to_string())
}

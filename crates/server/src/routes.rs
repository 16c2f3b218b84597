use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use boxy_core::types::{MediaType, StreamsResponse, UserConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::manifest::Manifest;
use crate::resolver::StreamRequest;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/manifest.json", get(manifest))
        .route("/configure", get(configure))
        .route("/stream/{media_type}/{id}", get(stream))
        .route("/{config}/manifest.json", get(manifest_with_config))
        .route("/{config}/stream/{media_type}/{id}", get(stream_with_config))
        // The media-center client is a cross-origin web app.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json((*state.manifest).clone())
}

/// Install links embed the config before `/manifest.json`; the manifest
/// itself does not depend on it.
async fn manifest_with_config(
    State(state): State<AppState>,
    Path(_config): Path<String>,
) -> Json<Manifest> {
    Json((*state.manifest).clone())
}

// ---------------------------------------------------------------------------
// Configure page
// ---------------------------------------------------------------------------

async fn configure() -> Html<&'static str> {
    Html(include_str!("configure.html"))
}

// ---------------------------------------------------------------------------
// Stream resource
// ---------------------------------------------------------------------------

async fn stream(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    Json(handle_stream(&state, &media_type, &id, None).await)
}

async fn stream_with_config(
    State(state): State<AppState>,
    Path((config, media_type, id)): Path<(String, String, String)>,
) -> Json<StreamsResponse> {
    Json(handle_stream(&state, &media_type, &id, decode_config(&config)).await)
}

async fn handle_stream(
    state: &AppState,
    media_type: &str,
    id: &str,
    config: Option<UserConfig>,
) -> StreamsResponse {
    // Anything outside the supported set short-circuits before the gate.
    let Ok(media_type) = media_type.parse::<MediaType>() else {
        debug!(media_type, "unsupported media type");
        return StreamsResponse::empty();
    };

    let external_id = id.strip_suffix(".json").unwrap_or(id);

    let req = StreamRequest {
        media_type,
        external_id: external_id.to_string(),
        config,
    };
    state.resolver.resolve(&req).await
}

/// Decode the base64 JSON config segment of an install link. An undecodable
/// segment behaves exactly like missing configuration.
fn decode_config(segment: &str) -> Option<UserConfig> {
    let bytes = STANDARD
        .decode(segment)
        .or_else(|_| URL_SAFE_NO_PAD.decode(segment))
        .ok()?;

    match serde_json::from_slice(&bytes) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(error = %e, "undecodable config segment");
            None
        }
    }
}

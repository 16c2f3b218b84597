use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use boxy_server::backend::{BackendLocator, FixedLocator, UserConfigLocator};
use boxy_server::config::Config;
use boxy_server::manifest::Manifest;
use boxy_server::resolver::Resolver;
use boxy_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let provider = Arc::new(boxy_metadata::tmdb::TmdbClient::new(
        config.tmdb_api_key.clone(),
    ));

    let (locator, manifest): (Arc<dyn BackendLocator>, Manifest) = match &config.fixed_backend {
        Some(location) => {
            info!(backend = %location.backend_url, "running in fixed-backend mode");
            (
                Arc::new(FixedLocator::new(location.clone())),
                Manifest::fixed_backend(),
            )
        }
        None => {
            info!("running in user-configured mode");
            (Arc::new(UserConfigLocator), Manifest::user_configured())
        }
    };

    let state = AppState {
        resolver: Arc::new(Resolver::new(provider, locator)),
        manifest: Arc::new(manifest),
    };

    let app = boxy_server::routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "addon listening");

    axum::serve(listener, app).await?;
    Ok(())
}

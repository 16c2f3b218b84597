//! The resolution-and-forwarding handler: gate, lookup, notify, respond.

use std::sync::Arc;

use boxy_core::types::{MediaType, StreamDescriptor, StreamsResponse, UserConfig};
use boxy_metadata::MetadataError;
use boxy_metadata::provider::MetadataProvider;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::{BackendLocator, BackendNotifier};

/// Fixed descriptor text identifying the source to the client.
pub const STREAM_TITLE: &str = "Custom Backend Stream";
pub const STREAM_NAME: &str = "Boxy (Vercel)";

/// One inbound "resolve stream for media" invocation. Request-scoped and
/// immutable once constructed.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    pub media_type: MediaType,
    pub external_id: String,
    pub config: Option<UserConfig>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("backend locations not configured")]
    ConfigurationMissing,
    #[error("metadata lookup failed: {0}")]
    Lookup(#[from] MetadataError),
    #[error("unsupported request: {0}")]
    Unsupported(String),
}

/// Orchestrates the two outbound calls and maps every outcome to a
/// well-formed response.
pub struct Resolver {
    provider: Arc<dyn MetadataProvider>,
    locator: Arc<dyn BackendLocator>,
    notifier: BackendNotifier,
}

impl Resolver {
    pub fn new(provider: Arc<dyn MetadataProvider>, locator: Arc<dyn BackendLocator>) -> Self {
        Self {
            provider,
            locator,
            notifier: BackendNotifier::new(),
        }
    }

    /// Outer failure boundary. The client always gets a well-formed result;
    /// every error kind degrades to an empty stream list with its own
    /// diagnostic, never a protocol-level error.
    pub async fn resolve(&self, req: &StreamRequest) -> StreamsResponse {
        match self.try_resolve(req).await {
            Ok(stream) => StreamsResponse::single(stream),
            Err(e) => {
                match &e {
                    ResolveError::Unsupported(_) => {
                        debug!(id = %req.external_id, "request skipped: {e}");
                    }
                    ResolveError::ConfigurationMissing => {
                        warn!(id = %req.external_id, "request rejected: {e}");
                    }
                    ResolveError::Lookup(_) => {
                        warn!(id = %req.external_id, "request failed: {e}");
                    }
                }
                StreamsResponse::empty()
            }
        }
    }

    async fn try_resolve(&self, req: &StreamRequest) -> Result<StreamDescriptor, ResolveError> {
        if req.external_id.is_empty() {
            return Err(ResolveError::Unsupported("empty external id".to_string()));
        }
        if !self.locator.supports(req.media_type) {
            return Err(ResolveError::Unsupported(format!(
                "media type {} not served",
                req.media_type
            )));
        }

        // Gate: no external call happens unless this passes.
        let location = self.locator.locate(req.config.as_ref())?;

        let metadata = self.provider.find_by_external_id(&req.external_id).await?;
        debug!(
            provider = self.provider.name(),
            title = %metadata.title,
            year = ?metadata.year,
            "metadata resolved"
        );

        // The backend prepares the source asynchronously; its outcome does
        // not gate the response.
        if let Err(e) = self.notifier.notify(&location, &metadata).await {
            warn!(id = %req.external_id, error = %e, "backend notification failed");
        }

        Ok(StreamDescriptor {
            url: location.stream_url,
            title: STREAM_TITLE.to_string(),
            name: STREAM_NAME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use boxy_core::types::BackendLocation;
    use boxy_metadata::MediaMetadata;

    use super::*;
    use crate::backend::{FixedLocator, UserConfigLocator};

    enum Script {
        Found(MediaMetadata),
        NotFound,
    }

    struct StubProvider {
        script: Script,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn found(title: &str, year: Option<&str>) -> Self {
            Self {
                script: Script::Found(MediaMetadata {
                    title: title.to_string(),
                    year: year.map(|y| y.to_string()),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn not_found() -> Self {
            Self {
                script: Script::NotFound,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl MetadataProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn find_by_external_id(
            &self,
            _external_id: &str,
        ) -> Result<MediaMetadata, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Found(meta) => Ok(meta.clone()),
                Script::NotFound => Err(MetadataError::NotFound),
            }
        }
    }

    fn request(media_type: MediaType, config: Option<UserConfig>) -> StreamRequest {
        StreamRequest {
            media_type,
            external_id: "tt0111161".to_string(),
            config,
        }
    }

    // Backend that refuses connections immediately; notification failure
    // must not suppress the descriptor.
    const DEAD_BACKEND: &str = "http://127.0.0.1:1";

    #[tokio::test]
    async fn missing_config_short_circuits_before_lookup() {
        let provider = Arc::new(StubProvider::found("The Shawshank Redemption", Some("1994")));
        let resolver = Resolver::new(provider.clone(), Arc::new(UserConfigLocator));

        let result = resolver.resolve(&request(MediaType::Movie, None)).await;
        assert!(result.streams.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_external_id_short_circuits() {
        let provider = Arc::new(StubProvider::found("x", None));
        let resolver = Resolver::new(provider.clone(), Arc::new(UserConfigLocator));

        let req = StreamRequest {
            media_type: MediaType::Movie,
            external_id: String::new(),
            config: Some(UserConfig {
                backend_url: Some(DEAD_BACKEND.to_string()),
                stream_url: Some("http://s/".to_string()),
            }),
        };
        assert!(resolver.resolve(&req).await.streams.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fixed_mode_rejects_series_before_lookup() {
        let provider = Arc::new(StubProvider::found("Breaking Bad", Some("2008")));
        let locator = FixedLocator::new(BackendLocation {
            backend_url: DEAD_BACKEND.to_string(),
            stream_url: "http://stream:8888/".to_string(),
        });
        let resolver = Resolver::new(provider.clone(), Arc::new(locator));

        let result = resolver.resolve(&request(MediaType::Series, None)).await;
        assert!(result.streams.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_failure_yields_empty_response() {
        let provider = Arc::new(StubProvider::not_found());
        let resolver = Resolver::new(provider.clone(), Arc::new(UserConfigLocator));

        let result = resolver
            .resolve(&request(
                MediaType::Movie,
                Some(UserConfig {
                    backend_url: Some(DEAD_BACKEND.to_string()),
                    stream_url: Some("http://s/".to_string()),
                }),
            ))
            .await;
        assert!(result.streams.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn notification_failure_does_not_suppress_stream() {
        let provider = Arc::new(StubProvider::found("The Shawshank Redemption", Some("1994")));
        let resolver = Resolver::new(provider, Arc::new(UserConfigLocator));

        let result = resolver
            .resolve(&request(
                MediaType::Movie,
                Some(UserConfig {
                    backend_url: Some(DEAD_BACKEND.to_string()),
                    stream_url: Some("https://s.example/".to_string()),
                }),
            ))
            .await;

        assert_eq!(result.streams.len(), 1);
        let stream = &result.streams[0];
        assert_eq!(stream.url, "https://s.example/");
        assert_eq!(stream.title, STREAM_TITLE);
        assert_eq!(stream.name, STREAM_NAME);
    }
}

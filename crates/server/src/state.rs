use std::sync::Arc;

use crate::manifest::Manifest;
use crate::resolver::Resolver;

/// Shared application state passed to all handlers. Immutable after startup;
/// requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub manifest: Arc<Manifest>,
}

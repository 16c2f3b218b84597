use boxy_core::types::MediaType;
use serde::Serialize;

/// Addon manifest, the capability descriptor the media-center client fetches
/// before anything else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<MediaType>,
    pub id_prefixes: Vec<String>,
    pub catalogs: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<BehaviorHints>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub configurable: bool,
    pub configuration_required: bool,
}

impl Manifest {
    fn base(types: Vec<MediaType>) -> Self {
        Self {
            id: "com.boxy.vercel.addon".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: "Boxy Peerflix (Vercel)".to_string(),
            description: "A cloud-hosted addon that connects to a custom backend server."
                .to_string(),
            resources: vec!["stream".to_string()],
            types,
            id_prefixes: vec!["tt".to_string()],
            catalogs: Vec::new(),
            behavior_hints: None,
        }
    }

    /// Deployment where each installation carries its own backend/stream
    /// URLs; the client is told configuration is required up front.
    pub fn user_configured() -> Self {
        Self {
            behavior_hints: Some(BehaviorHints {
                configurable: true,
                configuration_required: true,
            }),
            ..Self::base(vec![MediaType::Movie, MediaType::Series])
        }
    }

    /// Deployment with operator-configured backend/stream locations; serves
    /// movies only and needs no per-install configuration.
    pub fn fixed_backend() -> Self {
        Self::base(vec![MediaType::Movie])
    }
}

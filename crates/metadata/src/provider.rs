use crate::{MediaMetadata, MetadataError};

/// A metadata provider that can cross-reference external catalog ids.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve an external identifier (e.g. a "tt"-prefixed IMDb id) to a
    /// canonical title/year. `NotFound` when the provider knows no match.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<MediaMetadata, MetadataError>;
}

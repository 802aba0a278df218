//! The seam between decoders and the network

use crate::error::Result;
use async_trait::async_trait;

/// Anything that can GET a Redfish path and hand back the raw body.
///
/// The HTTP client implements this; collection expansion only needs this
/// trait, so it can run against an in-memory fake as well.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `path` (relative to the endpoint's base URL).
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

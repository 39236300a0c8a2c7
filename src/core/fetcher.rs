//! Rate retrieval abstraction

use super::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateFetcher: Send + Sync {
    /// Retrieves the raw body of a fresh rate snapshot.
    async fn fetch(&self) -> Result<Vec<u8>>;
}

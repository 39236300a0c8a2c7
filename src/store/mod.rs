//! Persistence for the last fetched rate snapshot.

pub mod disk;
pub mod memory;

use crate::core::{RateSnapshot, Result};

pub use disk::FileRateStore;
pub use memory::MemoryRateStore;

/// Holds a single snapshot, stored as the raw body the rate service returned.
pub trait RateStore: Send + Sync {
    /// Replaces the stored snapshot with `bytes`.
    fn persist(&self, bytes: &[u8]) -> Result<()>;

    /// Decodes the stored snapshot.
    fn load(&self) -> Result<RateSnapshot>;
}

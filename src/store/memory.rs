use super::RateStore;
use crate::core::{Error, RateSnapshot, Result};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// In-memory store holding the last persisted body.
#[derive(Default)]
pub struct MemoryRateStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `bytes`, as if a previous run had cached them.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
        }
    }

    /// Returns a copy of the stored body, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RateStore for MemoryRateStore {
    fn persist(&self, bytes: &[u8]) -> Result<()> {
        let mut stored = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Cache PUT ({} bytes)", bytes.len());
        *stored = Some(bytes.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<RateSnapshot> {
        let stored = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        match stored.as_deref() {
            Some(bytes) => {
                debug!("Cache HIT");
                RateSnapshot::from_slice(bytes)
            }
            None => {
                debug!("Cache MISS");
                Err(Error::Io {
                    path: "<memory>".into(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no snapshot has been stored",
                    ),
                })
            }
        }
    }
}

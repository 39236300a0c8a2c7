use super::RateStore;
use crate::core::{Error, RateSnapshot, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps the snapshot in one file, overwritten wholesale on every persist.
///
/// Writes are not atomic and the file is not locked; an interrupted write or two
/// processes writing at once can leave a corrupt cache, which the next load reports.
pub struct FileRateStore {
    path: PathBuf,
}

impl FileRateStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RateStore for FileRateStore {
    fn persist(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<RateSnapshot> {
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        RateSnapshot::from_slice(&bytes)
    }
}

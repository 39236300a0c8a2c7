//! Error taxonomy shared by the fetch, store, and validation stages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The rate service could not be reached or the body could not be read.
    #[error("API connection error: {0}")]
    Network(#[from] reqwest::Error),

    /// The rate service answered with a non-2xx status.
    #[error("API returned status code {0}")]
    HttpStatus(u16),

    /// Reading or writing the cache file failed.
    #[error("Cache file error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rate data was not a usable snapshot.
    #[error("Invalid exchange rate data: {0}")]
    Decode(String),

    #[error("Not enough arguments: expected at least 2, got {0}")]
    ArgumentCount(usize),

    #[error("Invalid currency amount '{input}': {reason}")]
    AmountParse { input: String, reason: String },

    #[error("Currency {0} not supported")]
    UnsupportedCurrency(String),
}

impl Error {
    /// True for errors caused by the command-line input rather than the rate data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ArgumentCount(_) | Error::AmountParse { .. } | Error::UnsupportedCurrency(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

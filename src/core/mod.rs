//! Core conversion logic and abstractions

pub mod config;
pub mod convert;
pub mod error;
pub mod fetcher;
pub mod log;
pub mod request;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use convert::{Conversion, conversions, convert};
pub use error::{Error, Result};
pub use fetcher::RateFetcher;
pub use request::ConversionRequest;
pub use snapshot::RateSnapshot;

pub mod convert;
pub mod setup;
pub mod ui;

pub use convert::{Outcome, run};

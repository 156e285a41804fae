//! Pipeline entry points for link filtering operations.
//!
//! - `diff`: compute which new lines survive the old baseline
//! - `run_convert`: full file-to-file conversion with audit trail

pub mod convert;
pub mod diff;

pub use convert::{ConvertOptions, ConvertOutcome, run_convert};
pub use diff::{DiffEngine, DiffOutcome, diff};

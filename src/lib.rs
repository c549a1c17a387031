//! dwi-gradcheck: confirm that the two halves of a DWI gradient table
//! describe the same acquisition scheme.
//!
//! # Modules
//! - `data`: gradient records, table loading, and the matching predicate
//! - `check`: pairs record `i` with record `i + n/2` and collects results
//! - `report`: text and JSON rendering of a check
//! - `error`: domain errors

pub mod check;
pub mod data;
pub mod error;
pub mod report;

pub use check::{GradientReport, PairComparison, compare_halves};
pub use data::loader::load_file;
pub use data::matcher::{MatchTolerance, grads_match, grads_match_with};
pub use data::model::{GradientRecord, GradientTable};
pub use error::GradientError;

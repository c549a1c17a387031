use thiserror::Error;

/// Failures while turning a gradient table into comparable halves.
#[derive(Debug, Error, PartialEq)]
pub enum GradientError {
    #[error("line {line}: expected 4 values (x y z b), found {found}")]
    TokenCount { line: usize, found: usize },

    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("gradient table has {0} records; an even count is required to split it into halves")]
    OddRecordCount(usize),
}

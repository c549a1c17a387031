use log::{debug, info};
use serde::Serialize;

use crate::data::matcher::{MatchTolerance, grads_match_with};
use crate::data::model::{GradientRecord, GradientTable};
use crate::error::GradientError;

// ---------------------------------------------------------------------------
// One comparison
// ---------------------------------------------------------------------------

/// Result of comparing record `first_index` with its twin in the second half.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairComparison {
    pub first_index: usize,
    pub second_index: usize,
    pub first: GradientRecord,
    pub second: GradientRecord,
    pub matched: bool,
}

/// Compare every record of the first half with the record `n/2` later.
///
/// Fails without comparing anything when the table length is odd.
pub fn compare_halves(
    table: &GradientTable,
    tolerance: &MatchTolerance,
) -> Result<Vec<PairComparison>, GradientError> {
    let (first_half, second_half) = table.halves()?;
    let h = first_half.len();

    Ok(first_half
        .iter()
        .zip(second_half)
        .enumerate()
        .map(|(i, (&first, &second))| {
            let j = i + h;
            let matched = grads_match_with(&first, &second, tolerance);
            debug!("pair ({i}, {j}): {first} vs {second} -> {matched}");
            PairComparison {
                first_index: i,
                second_index: j,
                first,
                second,
                matched,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Whole-table report
// ---------------------------------------------------------------------------

/// All comparisons for one table plus the tolerance they were made with.
#[derive(Debug, Clone, Serialize)]
pub struct GradientReport {
    pub tolerance: MatchTolerance,
    pub comparisons: Vec<PairComparison>,
}

impl GradientReport {
    /// Run the pairwise check over `table`.
    pub fn build(table: &GradientTable, tolerance: MatchTolerance) -> Result<Self, GradientError> {
        let comparisons = compare_halves(table, &tolerance)?;
        let report = GradientReport {
            tolerance,
            comparisons,
        };
        info!(
            "{} of {} gradient pairs match",
            report.matched_count(),
            report.len()
        );
        Ok(report)
    }

    /// Number of compared pairs.
    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.comparisons.iter().filter(|c| c.matched).count()
    }

    /// `(first_index, second_index)` of every pair that failed to match.
    pub fn mismatches(&self) -> Vec<(usize, usize)> {
        self.comparisons
            .iter()
            .filter(|c| !c.matched)
            .map(|c| (c.first_index, c.second_index))
            .collect()
    }

    /// True when every pair matched (vacuously true for an empty table).
    pub fn all_match(&self) -> bool {
        self.comparisons.iter().all(|c| c.matched)
    }
}

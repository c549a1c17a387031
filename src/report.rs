use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::check::GradientReport;

/// How the comparison results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Index pair, both records and the result, one block per pair.
    #[default]
    Text,
    /// The whole report as a JSON document.
    Json,
}

/// Write `report` to `out` in the requested format.
pub fn write_report<W: Write>(out: &mut W, report: &GradientReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, report),
        OutputFormat::Json => write_json(out, report),
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// ```text
/// (0, 2)
/// [1.0, 0.0, 0.0, 1000.0] [1.0, 0.0, 0.0, 1005.0]
/// true
/// ```
fn write_text<W: Write>(out: &mut W, report: &GradientReport) -> Result<()> {
    for c in &report.comparisons {
        writeln!(out, "({}, {})", c.first_index, c.second_index)?;
        writeln!(out, "{} {}", c.first, c.second)?;
        writeln!(out, "{}", c.matched)?;
    }

    let mismatches = report.mismatches();
    if mismatches.is_empty() {
        writeln!(out, "{}/{} pairs match", report.matched_count(), report.len())?;
    } else {
        let list: Vec<String> = mismatches.iter().map(|(i, j)| format!("({i}, {j})")).collect();
        writeln!(
            out,
            "{}/{} pairs match; mismatched: {}",
            report.matched_count(),
            report.len(),
            list.join(", ")
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn write_json<W: Write>(out: &mut W, report: &GradientReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("serializing report")?;
    writeln!(out)?;
    Ok(())
}

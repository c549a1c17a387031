use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use serde::Deserialize;

use super::model::{GradientRecord, GradientTable};
use crate::error::GradientError;

/// Non-zero directions further than this from unit length are reported.
pub const UNIT_NORM_TOLERANCE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a gradient table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row `x,y,z,b` (or `gx,gy,gz,bval`)
/// * `.json` – `[[x, y, z, b], ...]`
/// * anything else – MRtrix text table, as written by `mrinfo -dwgrad`
pub fn load_file(path: &Path) -> Result<GradientTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        _ => load_text(path),
    }
    .with_context(|| format!("loading gradient table {}", path.display()))?;

    debug!("loaded {} gradient records from {}", table.len(), path.display());
    check_unit_norms(&table);
    Ok(table)
}

// ---------------------------------------------------------------------------
// MRtrix text loader
// ---------------------------------------------------------------------------

fn load_text(path: &Path) -> Result<GradientTable> {
    let text = std::fs::read_to_string(path).context("reading gradient file")?;
    Ok(parse_text(&text)?)
}

/// Parse an MRtrix-style table: one `x y z b` row per line.
///
/// Lines starting with `#` are skipped. Blank lines are only tolerated
/// after the last row; a blank line followed by more rows fails like any
/// other row without four values. Line numbers in errors are 1-based and
/// count every physical line.
pub fn parse_text(text: &str) -> Result<GradientTable, GradientError> {
    let mut records = Vec::new();
    let mut first_blank: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            first_blank.get_or_insert(line_no);
            continue;
        }
        if let Some(blank) = first_blank {
            return Err(GradientError::TokenCount { line: blank, found: 0 });
        }
        records.push(parse_row(line, line_no)?);
    }

    Ok(GradientTable::from_records(records))
}

fn parse_row(line: &str, line_no: usize) -> Result<GradientRecord, GradientError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(GradientError::TokenCount {
            line: line_no,
            found: tokens.len(),
        });
    }

    let mut values = [0.0f64; 4];
    for (slot, tok) in values.iter_mut().zip(&tokens) {
        *slot = tok.parse::<f64>().map_err(|_| GradientError::InvalidNumber {
            line: line_no,
            token: tok.to_string(),
        })?;
    }
    Ok(GradientRecord::from(values))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "gx")]
    x: f64,
    #[serde(alias = "gy")]
    y: f64,
    #[serde(alias = "gz")]
    z: f64,
    #[serde(alias = "bval")]
    b: f64,
}

/// CSV layout: header row naming the four columns, one record per row.
fn load_csv(path: &Path) -> Result<GradientTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(GradientRecord::new(row.x, row.y, row.z, row.b));
    }

    Ok(GradientTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema: an array of four-number rows.
///
/// ```json
/// [[1.0, 0.0, 0.0, 1000.0], [0.0, 0.0, 0.0, 0.0]]
/// ```
fn load_json(path: &Path) -> Result<GradientTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<GradientTable> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(text).context("parsing JSON")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if row.len() != 4 {
            bail!("Row {i}: expected 4 values (x y z b), found {}", row.len());
        }
        records.push(GradientRecord::new(row[0], row[1], row[2], row[3]));
    }

    Ok(GradientTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Indices of non-zero directions whose length is not close to 1.
pub fn non_unit_directions(table: &GradientTable) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_zero_direction())
        .filter(|(_, r)| !((r.norm() - 1.0).abs() <= UNIT_NORM_TOLERANCE))
        .map(|(i, _)| i)
        .collect()
}

fn check_unit_norms(table: &GradientTable) {
    for i in non_unit_directions(table) {
        let r = &table.records[i];
        warn!(
            "record {i}: direction {:?} has norm {:.4}; dot products assume unit vectors",
            r.direction(),
            r.norm()
        );
    }
}

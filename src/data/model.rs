use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradientError;

// ---------------------------------------------------------------------------
// GradientRecord – one row of the gradient table
// ---------------------------------------------------------------------------

/// One DWI volume's gradient: direction `(x, y, z)` and b-value.
///
/// A b=0 volume is conventionally encoded with an all-zero direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub b: f64,
}

impl GradientRecord {
    pub fn new(x: f64, y: f64, z: f64, b: f64) -> Self {
        Self { x, y, z, b }
    }

    pub fn direction(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True when every direction component is exactly zero.
    /// NaN compares unequal to zero and so counts as a non-zero component.
    pub fn is_zero_direction(&self) -> bool {
        self.direction().iter().all(|&c| c == 0.0)
    }

    /// Euclidean length of the direction.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Dot product of the two directions (b-values ignored).
    pub fn dot(&self, other: &GradientRecord) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Copy with the direction rescaled to unit length.
    /// Zero directions are returned unchanged.
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if self.is_zero_direction() || n == 0.0 {
            return *self;
        }
        Self::new(self.x / n, self.y / n, self.z / n, self.b)
    }
}

impl From<[f64; 4]> for GradientRecord {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl fmt::Display for GradientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the trailing ".0" on whole numbers.
        write!(f, "[{:?}, {:?}, {:?}, {:?}]", self.x, self.y, self.z, self.b)
    }
}

// ---------------------------------------------------------------------------
// GradientTable – the complete loaded table
// ---------------------------------------------------------------------------

/// All gradient records in acquisition order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientTable {
    pub records: Vec<GradientRecord>,
}

impl GradientTable {
    pub fn from_records(records: Vec<GradientRecord>) -> Self {
        GradientTable { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Length of each half. Fails on an odd record count.
    pub fn half_len(&self) -> Result<usize, GradientError> {
        let n = self.len();
        if n % 2 != 0 {
            return Err(GradientError::OddRecordCount(n));
        }
        Ok(n / 2)
    }

    /// The first and second halves, `[0, n/2)` and `[n/2, n)`.
    pub fn halves(&self) -> Result<(&[GradientRecord], &[GradientRecord]), GradientError> {
        let h = self.half_len()?;
        Ok(self.records.split_at(h))
    }
}

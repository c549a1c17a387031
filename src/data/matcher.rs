use serde::{Deserialize, Serialize};

use super::model::GradientRecord;

/// Minimum `|dot|` for two non-zero directions to count as the same axis.
pub const DEFAULT_DOT_THRESHOLD: f64 = 0.999;

/// Maximum absolute b-value difference for two volumes to match.
pub const DEFAULT_B_TOLERANCE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Matching parameters
// ---------------------------------------------------------------------------

/// Tolerances used by [`grads_match_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchTolerance {
    pub dot_threshold: f64,
    pub b_tolerance: f64,
    /// Rescale non-zero directions to unit length before the dot product.
    pub normalize: bool,
}

impl Default for MatchTolerance {
    fn default() -> Self {
        Self {
            dot_threshold: DEFAULT_DOT_THRESHOLD,
            b_tolerance: DEFAULT_B_TOLERANCE,
            normalize: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Whether two records describe the same diffusion gradient, using the
/// default tolerances.
pub fn grads_match(a: &GradientRecord, b: &GradientRecord) -> bool {
    grads_match_with(a, b, &MatchTolerance::default())
}

/// Whether two records describe the same diffusion gradient.
///
/// Direction check:
/// * both directions zero → directions agree
/// * exactly one zero → no match
/// * both non-zero → `|a · b|` must reach `dot_threshold` (sign ignored)
///
/// Then the b-values must differ by at most `b_tolerance`.
pub fn grads_match_with(a: &GradientRecord, b: &GradientRecord, tol: &MatchTolerance) -> bool {
    match (a.is_zero_direction(), b.is_zero_direction()) {
        (true, true) => {}
        (false, false) => {
            let dot = if tol.normalize {
                a.normalized().dot(&b.normalized())
            } else {
                a.dot(b)
            };
            if dot.abs() < tol.dot_threshold {
                return false;
            }
        }
        _ => return false,
    }

    if (a.b - b.b).abs() > tol.b_tolerance {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(x: f64, y: f64, z: f64, b: f64) -> GradientRecord {
        GradientRecord::new(x, y, z, b)
    }

    #[test]
    fn test_both_zero_directions() {
        assert!(grads_match(&g(0.0, 0.0, 0.0, 0.0), &g(0.0, 0.0, 0.0, 0.0)));
        assert!(grads_match(&g(0.0, 0.0, 0.0, 0.0), &g(0.0, 0.0, 0.0, 10.0)));
        assert!(!grads_match(&g(0.0, 0.0, 0.0, 0.0), &g(0.0, 0.0, 0.0, 10.5)));
    }

    #[test]
    fn test_one_zero_direction_never_matches() {
        assert!(!grads_match(&g(1.0, 0.0, 0.0, 0.0), &g(0.0, 0.0, 0.0, 0.0)));
        assert!(!grads_match(&g(0.0, 0.0, 0.0, 1000.0), &g(0.0, 0.0, 1.0, 1000.0)));
    }

    #[test]
    fn test_collinear_within_b_tolerance() {
        assert!(grads_match(&g(1.0, 0.0, 0.0, 1000.0), &g(1.0, 0.0, 0.0, 1005.0)));
        // Antipodal directions describe the same axis.
        assert!(grads_match(&g(0.0, 1.0, 0.0, 1000.0), &g(0.0, -1.0, 0.0, 1000.0)));
    }

    #[test]
    fn test_orthogonal_directions() {
        assert!(!grads_match(&g(1.0, 0.0, 0.0, 1000.0), &g(0.0, 1.0, 0.0, 1000.0)));
    }

    #[test]
    fn test_b_value_out_of_tolerance() {
        assert!(!grads_match(&g(1.0, 0.0, 0.0, 1000.0), &g(1.0, 0.0, 0.0, 1015.0)));
    }

    #[test]
    fn test_dot_threshold_boundary() {
        // cos(theta) just above and just below 0.999
        let above = (0.9995f64).acos();
        let below = (0.998f64).acos();
        let a = g(1.0, 0.0, 0.0, 1000.0);
        assert!(grads_match(&a, &g(above.cos(), above.sin(), 0.0, 1000.0)));
        assert!(!grads_match(&a, &g(below.cos(), below.sin(), 0.0, 1000.0)));
    }

    #[test]
    fn test_unnormalized_directions() {
        let a = g(2.0, 0.0, 0.0, 1000.0);
        let b = g(0.5, 0.0, 0.0, 1000.0);
        // dot = 1.0 as given, so it passes without rescaling.
        assert!(grads_match(&a, &b));

        let short = g(0.9, 0.0, 0.0, 1000.0);
        assert!(!grads_match(&short, &short));
        let tol = MatchTolerance { normalize: true, ..Default::default() };
        assert!(grads_match_with(&short, &short, &tol));
    }

    #[test]
    fn test_custom_tolerance() {
        let tol = MatchTolerance { dot_threshold: 0.5, b_tolerance: 50.0, normalize: false };
        let a = g(1.0, 0.0, 0.0, 1000.0);
        let b = g(0.8, 0.6, 0.0, 1040.0);
        assert!(grads_match_with(&a, &b, &tol));
        assert!(!grads_match(&a, &b));
    }

    #[test]
    fn test_nan_b_value_is_not_rejected() {
        // |NaN| > tolerance is false, so only the direction check applies.
        assert!(grads_match(&g(1.0, 0.0, 0.0, f64::NAN), &g(1.0, 0.0, 0.0, 1000.0)));
        assert!(grads_match(&g(0.0, 0.0, 0.0, f64::NAN), &g(0.0, 0.0, 0.0, f64::NAN)));
        assert!(!grads_match(&g(1.0, 0.0, 0.0, f64::NAN), &g(0.0, 1.0, 0.0, 1000.0)));
    }

    #[test]
    fn test_nan_direction() {
        let nan_dir = g(f64::NAN, 0.0, 0.0, 1000.0);
        // Counts as non-zero, so a zero direction never pairs with it.
        assert!(!grads_match(&nan_dir, &g(0.0, 0.0, 0.0, 1000.0)));
        // |NaN| < threshold is false, so the dot check does not reject.
        assert!(grads_match(&nan_dir, &g(1.0, 0.0, 0.0, 1000.0)));
        assert!(!grads_match(&nan_dir, &g(1.0, 0.0, 0.0, 1020.0)));
    }

    #[test]
    fn test_symmetry() {
        let samples = [
            g(0.0, 0.0, 0.0, 0.0),
            g(0.0, 0.0, 0.0, 12.0),
            g(1.0, 0.0, 0.0, 1000.0),
            g(-1.0, 0.0, 0.0, 1009.0),
            g(0.0, 1.0, 0.0, 1000.0),
            g(0.6, 0.8, 0.0, 2000.0),
            g(0.7071, 0.7071, 0.0, 995.0),
            g(f64::NAN, 0.0, 0.0, 1000.0),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(grads_match(a, b), grads_match(b, a), "{a} vs {b}");
            }
        }
    }
}

//! Planar distance primitives.
//!
//! Only the Euclidean metric is needed for edge reconstruction. The routine
//! validates its inputs and surfaces detailed errors so callers can report
//! which node carried a bad coordinate.

mod euclidean;
mod types;

pub use self::euclidean::euclidean_distance;
pub use self::types::{Axis, Distance, DistanceError, PointKind};

// ============================================================================
// Kani Formal Verification
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::euclidean_distance;
    use crate::positions::Point;

    fn any_finite_point() -> Point {
        let x: f64 = kani::any();
        let y: f64 = kani::any();
        kani::assume(x.is_finite() && y.is_finite());
        Point::new(x, y)
    }

    /// Verifies Euclidean distance symmetry: d(a, b) = d(b, a).
    ///
    /// Symmetry must hold bit-for-bit because pair ordering relies on it.
    #[kani::proof]
    fn verify_euclidean_symmetry() {
        let a = any_finite_point();
        let b = any_finite_point();

        match (euclidean_distance(a, b), euclidean_distance(b, a)) {
            (Ok(d1), Ok(d2)) => {
                kani::assert(
                    d1.value().to_bits() == d2.value().to_bits(),
                    "euclidean distance symmetry violated",
                );
            }
            (Err(_), Err(_)) => {
                // Both overflowing is acceptable.
            }
            _ => {
                kani::assert(false, "asymmetric error behaviour in euclidean distance");
            }
        }
    }

    /// Verifies Euclidean distance is non-negative: d(a, b) >= 0.
    #[kani::proof]
    fn verify_euclidean_non_negative() {
        let a = any_finite_point();
        let b = any_finite_point();

        if let Ok(d) = euclidean_distance(a, b) {
            kani::assert(d.value() >= 0.0, "euclidean distance must be non-negative");
        }
    }

    /// Verifies Euclidean distance is zero on identical inputs: d(v, v) = 0.
    #[kani::proof]
    fn verify_euclidean_zero_on_identical() {
        let v = any_finite_point();

        if let Ok(d) = euclidean_distance(v, v) {
            kani::assert(d.value() == 0.0, "euclidean distance not zero on identical inputs");
        }
    }
}

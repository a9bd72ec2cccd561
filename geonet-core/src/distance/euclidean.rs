//! Euclidean distance between planar points.

use crate::distance::types::{Distance, DistanceError, FinitePoint, PointKind, Result};
use crate::positions::Point;

/// Computes the Euclidean distance between two points.
///
/// The result is symmetric and non-negative. It is computed with
/// [`f64::hypot`], so intermediate squares cannot overflow for finite
/// inputs.
///
/// # Examples
///
/// ```
/// use geonet_core::{DistanceError, Point, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(Point::new(1.0, 2.0), Point::new(4.0, 6.0))?;
///     assert!((distance.value() - 5.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::NonFinite`] when a coordinate is NaN or infinite.
/// - [`DistanceError::Overflow`] when the difference between finite
///   coordinates is not representable.
pub fn euclidean_distance(left: Point, right: Point) -> Result<Distance> {
    let left = FinitePoint::new(left, PointKind::Left)?;
    let right = FinitePoint::new(right, PointKind::Right)?;

    let dx = left.x() - right.x();
    let dy = left.y() - right.y();
    let distance = dx.hypot(dy);
    if !distance.is_finite() {
        return Err(DistanceError::Overflow);
    }

    Ok(Distance::from_raw(distance))
}

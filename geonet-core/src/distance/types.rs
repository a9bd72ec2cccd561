//! Domain primitives shared by the distance routines.

use core::{fmt, ops::Deref};

use thiserror::Error;

use crate::positions::Point;

/// Identifies whether an error was produced while inspecting the left or right
/// point argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Coordinate axis of a [`Point`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Errors emitted while computing distances.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Encountered a non-finite coordinate.
    #[error("{which} point has a non-finite {axis} coordinate: {value}")]
    NonFinite {
        /// Argument that carried the value.
        which: PointKind,
        /// Axis of the offending coordinate.
        axis: Axis,
        /// The offending value.
        value: f64,
    },
    /// Finite inputs produced a distance too large to represent.
    #[error("distance between finite points overflowed")]
    Overflow,
}

/// Convenient alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;

/// Point newtype that validates finiteness on construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FinitePoint(Point);

impl FinitePoint {
    /// Validates and constructs a [`FinitePoint`].
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::NonFinite`] when either coordinate is NaN or
    /// infinite.
    pub(crate) fn new(point: Point, which: PointKind) -> Result<Self> {
        for (axis, value) in [(Axis::X, point.x()), (Axis::Y, point.y())] {
            if !value.is_finite() {
                return Err(DistanceError::NonFinite { which, axis, value });
            }
        }
        Ok(Self(point))
    }
}

impl Deref for FinitePoint {
    type Target = Point;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Distance result newtype.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub(crate) fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw distance value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Deref for Distance {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

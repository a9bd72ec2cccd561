//! Node identifiers, planar coordinates, and the position table that maps one
//! to the other.
//!
//! [`Positions`] iterates in ascending [`NodeId`] order. That order is the
//! base order for candidate pair enumeration, so it also decides how equal
//! distances are tie-broken.

use std::collections::{BTreeMap, btree_map::Entry};
use std::fmt;

use crate::error::PositionsError;

/// Identifier assigned to a node.
///
/// # Examples
/// ```
/// use geonet_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[rustfmt::skip]
    #[must_use]
    pub const fn x(&self) -> f64 { self.x }

    /// Vertical coordinate.
    #[rustfmt::skip]
    #[must_use]
    pub const fn y(&self) -> f64 { self.y }

    /// Returns `true` when both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Immutable-once-loaded mapping from [`NodeId`] to [`Point`].
///
/// # Examples
/// ```
/// use geonet_core::{NodeId, Point, Positions};
///
/// let positions = Positions::try_from_iter([
///     (NodeId::new(2), Point::new(1.0, 0.0)),
///     (NodeId::new(1), Point::new(0.0, 0.0)),
/// ])?;
/// let ids: Vec<u64> = positions.node_ids().map(NodeId::get).collect();
/// assert_eq!(ids, [1, 2]);
/// # Ok::<(), geonet_core::PositionsError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions {
    entries: BTreeMap<NodeId, Point>,
}

impl Positions {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(id, point)` entries.
    ///
    /// # Errors
    /// Returns [`PositionsError::DuplicateNode`] when an identifier repeats and
    /// [`PositionsError::NonFiniteCoordinate`] when a coordinate is NaN or
    /// infinite.
    pub fn try_from_iter<I>(entries: I) -> Result<Self, PositionsError>
    where
        I: IntoIterator<Item = (NodeId, Point)>,
    {
        let mut positions = Self::new();
        for (node, point) in entries {
            positions.insert(node, point)?;
        }
        Ok(positions)
    }

    /// Adds a node and its coordinate.
    ///
    /// # Errors
    /// Returns [`PositionsError::DuplicateNode`] when `node` is already present
    /// and [`PositionsError::NonFiniteCoordinate`] when `point` is not finite.
    /// The table is left unchanged on error.
    pub fn insert(&mut self, node: NodeId, point: Point) -> Result<(), PositionsError> {
        if !point.is_finite() {
            return Err(PositionsError::NonFiniteCoordinate { node });
        }
        match self.entries.entry(node) {
            Entry::Occupied(_) => Err(PositionsError::DuplicateNode { node }),
            Entry::Vacant(slot) => {
                slot.insert(point);
                Ok(())
            }
        }
    }

    /// Number of nodes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the coordinate of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<Point> {
        self.entries.get(&node).copied()
    }

    /// Iterates `(id, point)` entries in ascending identifier order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeId, Point)> + '_ {
        self.entries.iter().map(|(node, point)| (*node, *point))
    }

    /// Iterates node identifiers in ascending order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }
}

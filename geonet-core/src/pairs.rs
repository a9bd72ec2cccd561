//! Candidate pair enumeration and distance ordering.
//!
//! Every unordered pair of distinct nodes is a candidate edge. Pairs are
//! enumerated in ascending `(source, target)` order over the position table,
//! and each pair records its enumeration index as a `sequence`. Sorting is
//! stable, so pairs at equal distance keep that enumeration order.

use std::cmp::Ordering;

use crate::{
    distance::euclidean_distance,
    error::{ReconstructError, Result},
    positions::{NodeId, Positions},
};

/// An unordered pair of distinct nodes in canonical form (`source < target`)
/// together with the distance between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidatePair {
    source: NodeId,
    target: NodeId,
    distance: f64,
    sequence: u64,
}

impl CandidatePair {
    /// Returns the smaller endpoint identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> NodeId { self.source }

    /// Returns the larger endpoint identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> NodeId { self.target }

    /// Returns the Euclidean distance between the endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub fn distance(&self) -> f64 { self.distance }

    /// Returns the enumeration index used for deterministic tie-breaking.
    #[must_use]
    #[rustfmt::skip]
    pub fn sequence(&self) -> u64 { self.sequence }
}

impl Eq for CandidatePair {}

impl Ord for CandidatePair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for CandidatePair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of distinct unordered pairs over `nodes` nodes, `n * (n - 1) / 2`.
///
/// Returns `None` when the count does not fit in `usize`.
///
/// # Examples
/// ```
/// use geonet_core::pair_count;
///
/// assert_eq!(pair_count(0), Some(0));
/// assert_eq!(pair_count(1), Some(0));
/// assert_eq!(pair_count(4), Some(6));
/// assert_eq!(pair_count(usize::MAX), None);
/// ```
#[must_use]
pub const fn pair_count(nodes: usize) -> Option<usize> {
    if nodes < 2 {
        return Some(0);
    }
    // Halve the even factor first so the product only overflows when the
    // result itself does.
    let below = nodes - 1;
    if nodes % 2 == 0 {
        (nodes / 2).checked_mul(below)
    } else {
        nodes.checked_mul(below / 2)
    }
}

/// Enumerates every unordered pair of distinct nodes with its distance.
///
/// Pairs appear in base order: ascending source identifier, then ascending
/// target identifier. `sequence` numbers count up from zero in that order.
///
/// # Errors
/// Returns [`ReconstructError::Distance`] when the distance between two
/// nodes cannot be represented.
///
/// # Examples
/// ```
/// use geonet_core::{NodeId, Point, Positions, enumerate_pairs};
///
/// let positions = Positions::try_from_iter([
///     (NodeId::new(1), Point::new(0.0, 0.0)),
///     (NodeId::new(2), Point::new(3.0, 4.0)),
///     (NodeId::new(3), Point::new(0.0, 1.0)),
/// ])?;
/// let pairs = enumerate_pairs(&positions)?;
/// let endpoints: Vec<(u64, u64)> = pairs
///     .iter()
///     .map(|pair| (pair.source().get(), pair.target().get()))
///     .collect();
/// assert_eq!(endpoints, [(1, 2), (1, 3), (2, 3)]);
/// assert_eq!(pairs[0].distance(), 5.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn enumerate_pairs(positions: &Positions) -> Result<Vec<CandidatePair>> {
    let nodes: Vec<_> = positions.iter().collect();
    let mut pairs = Vec::with_capacity(pair_count(nodes.len()).unwrap_or(0));
    let mut sequence = 0_u64;

    for (offset, &(source, left)) in nodes.iter().enumerate() {
        for &(target, right) in nodes.iter().skip(offset.saturating_add(1)) {
            let distance =
                euclidean_distance(left, right).map_err(|error| ReconstructError::Distance {
                    source_node: source,
                    target_node: target,
                    error,
                })?;
            pairs.push(CandidatePair {
                source,
                target,
                distance: distance.value(),
                sequence,
            });
            sequence = sequence.saturating_add(1);
        }
    }

    Ok(pairs)
}

/// Sorts pairs by ascending distance.
///
/// The sort is stable: pairs at equal distance keep their relative order,
/// which for freshly enumerated pairs is the base enumeration order.
pub fn sort_by_distance(pairs: &mut [CandidatePair]) {
    pairs.sort_by(|left, right| left.distance.total_cmp(&right.distance));
}

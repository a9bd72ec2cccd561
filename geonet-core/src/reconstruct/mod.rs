//! Pairwise-distance edge reconstruction.
//!
//! Given node coordinates and a target edge count, the reconstructor connects
//! the closest pairs first:
//!
//! 1. enumerate every unordered pair in ascending identifier order,
//! 2. compute each pair's Euclidean distance,
//! 3. stable-sort the pairs by ascending distance,
//! 4. insert the first `target` pairs into an edge-less graph over all nodes.
//!
//! Ties keep enumeration order, so output is reproducible bit-for-bit.
//! Preconditions are checked before any pair is generated: fewer than two
//! nodes is [`ReconstructError::InvalidInput`], and a target outside
//! `0..=N*(N-1)/2` is [`ReconstructError::InvalidTarget`].

use tracing::{Span, debug, field, info, instrument, warn};

#[cfg(feature = "cpu")]
use rayon::prelude::*;
#[cfg(feature = "cpu")]
use tracing::{Dispatch, dispatcher};

use crate::{
    error::{ReconstructError, Result},
    graph::Graph,
    pairs::{CandidatePair, enumerate_pairs, pair_count, sort_by_distance},
    positions::Positions,
    verify::{EdgeComparison, compare_edges},
};

/// Output of a reconstruction run.
///
/// # Examples
/// ```
/// use geonet_core::{NodeId, Point, Positions, reconstruct};
///
/// let positions = Positions::try_from_iter([
///     (NodeId::new(0), Point::new(0.0, 0.0)),
///     (NodeId::new(1), Point::new(1.0, 0.0)),
///     (NodeId::new(2), Point::new(0.0, 1.0)),
///     (NodeId::new(3), Point::new(10.0, 10.0)),
/// ])?;
/// let reconstruction = reconstruct(&positions, 2)?;
/// assert_eq!(reconstruction.edge_count(), 2);
/// assert_eq!(reconstruction.radius(), Some(1.0));
/// assert_eq!(reconstruction.graph().degree(NodeId::new(3)), Some(0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Reconstruction {
    graph: Graph,
    accepted: Vec<CandidatePair>,
    cutoff_tie: bool,
}

impl Reconstruction {
    /// The reconstructed graph: every input node, plus the accepted edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Consumes the reconstruction and returns the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_graph(self) -> Graph { self.graph }

    /// Accepted pairs with their distances, in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[CandidatePair] { &self.accepted }

    /// Number of accepted edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.accepted.len()
    }

    /// Distance of the last accepted pair: the connection radius implied by
    /// the closest-first rule. `None` when no edge was requested.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        self.accepted.last().map(CandidatePair::distance)
    }

    /// `true` when the first rejected pair lies at exactly the same distance
    /// as the last accepted pair, so the boundary was decided by tie-breaking
    /// rather than by distance alone.
    #[must_use]
    #[rustfmt::skip]
    pub fn cutoff_tie(&self) -> bool { self.cutoff_tie }

    /// Compares the reconstructed edges with `reference`.
    #[must_use]
    pub fn compare(&self, reference: &Graph) -> EdgeComparison {
        compare_edges(&self.graph, reference)
    }
}

/// Connects the `target_edge_count` closest pairs of `positions`.
///
/// # Errors
/// Returns [`ReconstructError::InvalidInput`] when `positions` holds fewer
/// than two nodes, [`ReconstructError::InvalidTarget`] when
/// `target_edge_count` exceeds the number of distinct pairs, and
/// [`ReconstructError::Distance`] when a pair distance overflows.
///
/// # Examples
/// ```
/// use geonet_core::{NodeId, Point, Positions, ReconstructError, reconstruct};
///
/// let positions = Positions::try_from_iter([
///     (NodeId::new(1), Point::new(0.0, 0.0)),
///     (NodeId::new(2), Point::new(1.0, 0.0)),
///     (NodeId::new(3), Point::new(0.0, 1.0)),
/// ])?;
/// let complete = reconstruct(&positions, 3)?;
/// assert_eq!(complete.edge_count(), 3);
///
/// let err = reconstruct(&positions, 4).expect_err("only three pairs exist");
/// assert!(matches!(
///     err,
///     ReconstructError::InvalidTarget { requested: 4, available: 3 }
/// ));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reconstruct(positions: &Positions, target_edge_count: usize) -> Result<Reconstruction> {
    // usize -> i128 is lossless on every supported target.
    let requested = i128::try_from(target_edge_count).unwrap_or(i128::MAX);
    reconstruct_checked(positions, requested)
}

/// Like [`reconstruct`], but accepts a signed target so that negative
/// requests from untyped sources surface as
/// [`ReconstructError::InvalidTarget`].
///
/// # Errors
/// As [`reconstruct`]; additionally any negative target is rejected.
pub fn reconstruct_signed(
    positions: &Positions,
    target_edge_count: i64,
) -> Result<Reconstruction> {
    reconstruct_checked(positions, i128::from(target_edge_count))
}

/// Reconstructs with the edge count of `reference` as the target.
///
/// This mirrors validating the rule against a known network: rebuild the
/// same number of edges from coordinates alone, then compare.
///
/// # Errors
/// As [`reconstruct`].
pub fn reconstruct_like(positions: &Positions, reference: &Graph) -> Result<Reconstruction> {
    reconstruct(positions, reference.edge_count())
}

/// Reconstructs several independent networks.
///
/// Results are returned in input order. With the `cpu` feature the batch is
/// processed on the rayon thread pool. Workers inherit the caller's
/// subscriber, so each network's span stays a child of the batch span.
#[must_use]
#[instrument(name = "core.reconstruct_many", skip(batch), fields(networks = batch.len()))]
pub fn reconstruct_many(batch: &[(&Positions, usize)]) -> Vec<Result<Reconstruction>> {
    #[cfg(feature = "cpu")]
    let results: Vec<_> = {
        let batch_span = Span::current();
        let dispatch = dispatcher::get_default(Dispatch::clone);
        batch
            .par_iter()
            .map(|&(positions, target)| {
                dispatcher::with_default(&dispatch, || {
                    batch_span.in_scope(|| reconstruct(positions, target))
                })
            })
            .collect()
    };
    #[cfg(not(feature = "cpu"))]
    let results: Vec<_> = batch
        .iter()
        .map(|&(positions, target)| reconstruct(positions, target))
        .collect();

    let failures = results.iter().filter(|result| result.is_err()).count();
    info!(
        networks = results.len(),
        failures, "batch reconstruction completed"
    );
    results
}

#[instrument(
    name = "core.reconstruct",
    err,
    skip(positions),
    fields(nodes = positions.len(), available = field::Empty),
)]
fn reconstruct_checked(positions: &Positions, requested: i128) -> Result<Reconstruction> {
    let nodes = positions.len();
    if nodes < 2 {
        warn!(nodes, "position table has fewer than two nodes");
        return Err(ReconstructError::InvalidInput { nodes });
    }

    let available = pair_count(nodes).unwrap_or(usize::MAX);
    Span::current().record("available", available);
    let target = usize::try_from(requested)
        .ok()
        .filter(|&target| target <= available)
        .ok_or(ReconstructError::InvalidTarget {
            requested,
            available,
        })?;

    let mut pairs = enumerate_pairs(positions)?;
    sort_by_distance(&mut pairs);
    debug!(pairs = pairs.len(), "candidate pairs sorted");

    let last_accepted = target.checked_sub(1).and_then(|index| pairs.get(index));
    let cutoff_tie = match (last_accepted, pairs.get(target)) {
        (Some(last), Some(next)) => last.distance() == next.distance(),
        _ => false,
    };
    pairs.truncate(target);

    let mut graph = Graph::with_nodes(positions.node_ids());
    for pair in &pairs {
        graph.insert_edge(pair.source(), pair.target())?;
    }

    let reconstruction = Reconstruction {
        graph,
        accepted: pairs,
        cutoff_tie,
    };
    if reconstruction.cutoff_tie {
        warn!(
            radius = reconstruction.radius(),
            "pair at the cutoff ties with the last accepted pair; enumeration order decided the boundary"
        );
    }
    info!(
        edges = reconstruction.edge_count(),
        radius = reconstruction.radius(),
        "reconstruction completed"
    );
    Ok(reconstruction)
}


#[cfg(test)]
mod property;

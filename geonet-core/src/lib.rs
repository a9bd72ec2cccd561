//! geonet core library.
//!
//! Rebuilds the edge set of a geometric network from node coordinates by
//! connecting the closest pairs first, then checks the result against a
//! reference graph.
//!
//! # Tie-breaking
//!
//! Candidate pairs are enumerated in ascending identifier order (source, then
//! target) and sorted with a stable sort, so pairs at equal distance are
//! accepted in that enumeration order. This rule makes reconstructions
//! reproducible bit-for-bit.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod error;
mod graph;
mod pairs;
mod positions;
mod reconstruct;
mod verify;

#[cfg(test)]
mod test_utils;

pub use crate::{
    distance::{Axis, Distance, DistanceError, PointKind, euclidean_distance},
    error::{
        GraphError, GraphErrorCode, PositionsError, PositionsErrorCode, ReconstructError,
        ReconstructErrorCode, Result,
    },
    graph::{Edge, Graph},
    pairs::{CandidatePair, enumerate_pairs, pair_count, sort_by_distance},
    positions::{NodeId, Point, Positions},
    reconstruct::{
        Reconstruction, reconstruct, reconstruct_like, reconstruct_many, reconstruct_signed,
    },
    verify::{EdgeComparison, compare_edges},
};

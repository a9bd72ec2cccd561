//! Error types for the geonet core library.
//!
//! Defines error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{distance::DistanceError, positions::NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::Positions`] table.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PositionsError {
    /// The same node identifier was supplied more than once.
    #[error("node {node} already has a position")]
    DuplicateNode {
        /// Identifier that appeared twice.
        node: NodeId,
    },
    /// A coordinate was NaN or infinite.
    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Identifier of the offending node.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`PositionsError`] variants.
    enum PositionsErrorCode for PositionsError {
        /// The same node identifier was supplied more than once.
        DuplicateNode => DuplicateNode { .. } => "POSITIONS_DUPLICATE_NODE",
        /// A coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "POSITIONS_NON_FINITE_COORDINATE",
    }
}

/// An error produced by [`crate::Graph`] mutations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge tried to connect a node to itself.
    #[error("edge ({node}, {node}) would be a self-loop")]
    SelfLoop {
        /// Node at both endpoints.
        node: NodeId,
    },
    /// An edge referenced a node that is not part of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode {
        /// Identifier missing from the node set.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge tried to connect a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge referenced a node that is not part of the graph.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
    }
}

/// Error type produced by the edge reconstructor.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReconstructError {
    /// Fewer than two distinct nodes were supplied, so no pair exists.
    #[error("reconstruction needs at least 2 nodes (got {nodes})")]
    InvalidInput {
        /// Number of nodes in the position table.
        nodes: usize,
    },
    /// The target edge count was negative or larger than the number of
    /// distinct unordered pairs.
    #[error("target edge count {requested} is outside 0..={available}")]
    InvalidTarget {
        /// The target requested by the caller.
        requested: i128,
        /// Number of distinct unordered pairs, `N * (N - 1) / 2`.
        available: usize,
    },
    /// The distance between two nodes could not be computed.
    #[error("distance between nodes {source_node} and {target_node} failed: {error}")]
    Distance {
        /// Smaller endpoint of the pair.
        source_node: NodeId,
        /// Larger endpoint of the pair.
        target_node: NodeId,
        #[source]
        /// Underlying distance failure.
        error: DistanceError,
    },
    /// Inserting an accepted pair into the output graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`ReconstructError`] variants.
    enum ReconstructErrorCode for ReconstructError {
        /// Fewer than two distinct nodes were supplied.
        InvalidInput => InvalidInput { .. } => "RECONSTRUCT_INVALID_INPUT",
        /// The target edge count was out of range.
        InvalidTarget => InvalidTarget { .. } => "RECONSTRUCT_INVALID_TARGET",
        /// The distance between two nodes could not be computed.
        DistanceFailure => Distance { .. } => "RECONSTRUCT_DISTANCE_FAILURE",
        /// Inserting an accepted pair into the output graph failed.
        GraphFailure => Graph { .. } => "RECONSTRUCT_GRAPH_FAILURE",
    }
}

impl ReconstructError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the output graph.
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the reconstructor.
pub type Result<T> = core::result::Result<T, ReconstructError>;

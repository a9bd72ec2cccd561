//! Benchmark setup error type.

use geonet_core::{PositionsError, ReconstructError};

use crate::source::SyntheticError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic position generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated table rejected a node.
    #[error("position table rejected a generated node: {0}")]
    Positions(#[from] PositionsError),
    /// A warm-up reconstruction failed.
    #[error("reconstruction failed: {0}")]
    Reconstruct(#[from] ReconstructError),
}

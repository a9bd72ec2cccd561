//! Seeded synthetic position tables.
//!
//! Nodes are scattered uniformly over a square so that pair distances are
//! distinct almost surely. Generation is deterministic for a given seed.

use geonet_core::{NodeId, Point, Positions};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Errors that may occur during synthetic table generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two nodes were requested, so no pair exists.
    #[error("node count must be at least 2 (got {node_count})")]
    TooFewNodes {
        /// Requested node count.
        node_count: usize,
    },
    /// The square side was not a positive finite number.
    #[error("extent must be positive and finite")]
    InvalidExtent,
}

/// Configuration for synthetic position generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes to place.
    pub node_count: usize,
    /// Side length of the square the nodes are drawn from.
    pub extent: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a uniform position table from `config`.
///
/// # Errors
///
/// Returns [`SyntheticError`] wrapped in [`BenchSetupError`]
/// when the configuration is unusable.
///
/// # Examples
///
/// ```
/// use geonet_benches::source::{SyntheticConfig, uniform_positions};
///
/// let config = SyntheticConfig { node_count: 10, extent: 1.0, seed: 42 };
/// let positions = uniform_positions(&config).expect("valid config");
/// assert_eq!(positions.len(), 10);
/// ```
pub fn uniform_positions(config: &SyntheticConfig) -> Result<Positions, BenchSetupError> {
    if config.node_count < 2 {
        return Err(SyntheticError::TooFewNodes {
            node_count: config.node_count,
        }
        .into());
    }
    if !(config.extent.is_finite() && config.extent > 0.0) {
        return Err(SyntheticError::InvalidExtent.into());
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let nodes = (0_u64..).take(config.node_count).map(|id| {
        let x = rng.gen_range(0.0..config.extent);
        let y = rng.gen_range(0.0..config.extent);
        (NodeId::new(id), Point::new(x, y))
    });
    Positions::try_from_iter(nodes).map_err(BenchSetupError::from)
}

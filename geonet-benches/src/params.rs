//! Benchmark parameter types.

use std::fmt;

/// Parameters for a reconstruction benchmark run.
#[derive(Clone, Debug)]
pub struct ReconstructBenchParams {
    /// Number of nodes in the position table.
    pub node_count: usize,
    /// Number of edges requested.
    pub target_edges: usize,
}

impl fmt::Display for ReconstructBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.target_edges)
    }
}

#[cfg(test)]
mod tests {
    use super::ReconstructBenchParams;

    #[test]
    fn display_names_node_and_edge_counts() {
        let params = ReconstructBenchParams {
            node_count: 500,
            target_edges: 1_500,
        };
        assert_eq!(params.to_string(), "n=500,k=1500");
    }
}

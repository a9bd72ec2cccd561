//! Comparison of a reconstructed edge set against a reference graph.

use crate::graph::{Edge, Graph};

/// Edge-level agreement between a reconstruction and a reference graph.
///
/// # Examples
/// ```
/// use geonet_core::{Graph, NodeId, compare_edges};
///
/// let nodes = [1, 2, 3].map(NodeId::new);
/// let id = NodeId::new;
/// let reference = Graph::from_edges(nodes, [(id(1), id(2)), (id(2), id(3))])?;
/// let rebuilt = Graph::from_edges(nodes, [(id(1), id(2)), (id(1), id(3))])?;
///
/// let comparison = compare_edges(&rebuilt, &reference);
/// assert_eq!(comparison.matched(), 1);
/// assert_eq!(comparison.missing().len(), 1);
/// assert_eq!(comparison.extra().len(), 1);
/// assert!(!comparison.is_exact());
/// # Ok::<(), geonet_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeComparison {
    matched: usize,
    missing: Vec<Edge>,
    extra: Vec<Edge>,
}

impl EdgeComparison {
    /// Number of edges present in both graphs.
    #[must_use]
    #[rustfmt::skip]
    pub fn matched(&self) -> usize { self.matched }

    /// Reference edges absent from the reconstruction, in reference order.
    #[must_use]
    #[rustfmt::skip]
    pub fn missing(&self) -> &[Edge] { &self.missing }

    /// Reconstructed edges absent from the reference, in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn extra(&self) -> &[Edge] { &self.extra }

    /// Returns `true` when both edge sets are identical.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    /// Jaccard overlap of the two edge sets: shared edges over the union.
    /// Two empty edge sets are considered identical.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "edge counts stay far below 2^52"
    )]
    pub fn jaccard(&self) -> f64 {
        let union = self
            .matched
            .saturating_add(self.missing.len())
            .saturating_add(self.extra.len());
        if union == 0 {
            return 1.0;
        }
        self.matched as f64 / union as f64
    }
}

/// Compares the edges of `reconstructed` with those of `reference`.
///
/// Only edges are compared; node sets may differ.
#[must_use]
pub fn compare_edges(reconstructed: &Graph, reference: &Graph) -> EdgeComparison {
    let missing: Vec<Edge> = reference
        .edges()
        .iter()
        .filter(|edge| !reconstructed.contains_edge(edge.source(), edge.target()))
        .copied()
        .collect();
    let extra: Vec<Edge> = reconstructed
        .edges()
        .iter()
        .filter(|edge| !reference.contains_edge(edge.source(), edge.target()))
        .copied()
        .collect();
    let matched = reconstructed.edge_count().saturating_sub(extra.len());

    EdgeComparison {
        matched,
        missing,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::NodeId;

    fn graph(edges: &[(u64, u64)]) -> Graph {
        Graph::from_edges(
            (0..6).map(NodeId::new),
            edges
                .iter()
                .map(|&(left, right)| (NodeId::new(left), NodeId::new(right))),
        )
        .expect("test graph must build")
    }

    #[rstest]
    #[case::identical(&[(0, 1), (1, 2)], &[(2, 1), (1, 0)], 2, 0, 0, 1.0)]
    #[case::disjoint(&[(0, 1)], &[(2, 3)], 0, 1, 1, 0.0)]
    #[case::partial(&[(0, 1), (1, 2), (3, 4)], &[(0, 1), (4, 5)], 1, 1, 2, 0.25)]
    #[case::both_empty(&[], &[], 0, 0, 0, 1.0)]
    fn compare_counts_edges(
        #[case] rebuilt: &[(u64, u64)],
        #[case] reference: &[(u64, u64)],
        #[case] matched: usize,
        #[case] missing: usize,
        #[case] extra: usize,
        #[case] jaccard: f64,
    ) {
        let comparison = compare_edges(&graph(rebuilt), &graph(reference));
        assert_eq!(comparison.matched(), matched);
        assert_eq!(comparison.missing().len(), missing);
        assert_eq!(comparison.extra().len(), extra);
        assert!((comparison.jaccard() - jaccard).abs() < 1e-12);
        assert_eq!(comparison.is_exact(), missing == 0 && extra == 0);
    }
}

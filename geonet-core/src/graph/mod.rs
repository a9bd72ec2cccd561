//! Minimal undirected adjacency-set graph.
//!
//! The reconstructor only needs node iteration and edge insertion, so this is
//! the one graph representation in the crate. Edges are kept in insertion
//! order alongside the adjacency sets; equality ignores that order.

use std::collections::{BTreeMap, BTreeSet};

use crate::{error::GraphError, positions::NodeId};

/// An undirected edge in canonical form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
}

impl Edge {
    /// Builds the canonical edge between `left` and `right`.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when both endpoints are equal.
    ///
    /// # Examples
    /// ```
    /// use geonet_core::{Edge, NodeId};
    ///
    /// let edge = Edge::new(NodeId::new(5), NodeId::new(2))?;
    /// assert_eq!(edge.source(), NodeId::new(2));
    /// assert_eq!(edge.target(), NodeId::new(5));
    /// # Ok::<(), geonet_core::GraphError>(())
    /// ```
    pub fn new(left: NodeId, right: NodeId) -> Result<Self, GraphError> {
        if left == right {
            return Err(GraphError::SelfLoop { node: left });
        }
        let (source, target) = if left < right {
            (left, right)
        } else {
            (right, left)
        };
        Ok(Self { source, target })
    }

    /// Returns the smaller endpoint identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> NodeId { self.source }

    /// Returns the larger endpoint identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> NodeId { self.target }
}

/// Undirected simple graph: no self-loops, no parallel edges.
///
/// # Examples
/// ```
/// use geonet_core::{Graph, NodeId};
///
/// let mut graph = Graph::with_nodes([1, 2, 3].map(NodeId::new));
/// assert!(graph.insert_edge(NodeId::new(1), NodeId::new(2))?);
/// assert!(!graph.insert_edge(NodeId::new(2), NodeId::new(1))?);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.degree(NodeId::new(3)), Some(0));
/// # Ok::<(), geonet_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph without nodes or edges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edge-less graph over `nodes`.
    #[must_use]
    pub fn with_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.insert_node(node);
        }
        graph
    }

    /// Creates a graph over `nodes` and inserts `edges` in order.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] or [`GraphError::UnknownNode`] for the
    /// first invalid edge. Repeated edges are ignored.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::with_nodes(nodes);
        for (left, right) in edges {
            graph.insert_edge(left, right)?;
        }
        Ok(graph)
    }

    /// Adds `node` without edges. Returns `false` when it was already present.
    pub fn insert_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Adds the undirected edge `{left, right}`.
    ///
    /// Returns `true` when the edge is new and `false` when it already
    /// existed. The graph is left unchanged on error.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `left == right` and
    /// [`GraphError::UnknownNode`] when an endpoint is not in the graph.
    pub fn insert_edge(&mut self, left: NodeId, right: NodeId) -> Result<bool, GraphError> {
        let edge = Edge::new(left, right)?;
        for node in [edge.source, edge.target] {
            if !self.adjacency.contains_key(&node) {
                return Err(GraphError::UnknownNode { node });
            }
        }

        let inserted = self
            .adjacency
            .get_mut(&edge.source)
            .is_some_and(|neighbours| neighbours.insert(edge.target));
        if !inserted {
            return Ok(false);
        }
        if let Some(neighbours) = self.adjacency.get_mut(&edge.target) {
            neighbours.insert(edge.source);
        }
        self.edges.push(edge);
        Ok(true)
    }

    /// Returns `true` when `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Returns `true` when the undirected edge `{left, right}` is present.
    #[must_use]
    pub fn contains_edge(&self, left: NodeId, right: NodeId) -> bool {
        self.adjacency
            .get(&left)
            .is_some_and(|neighbours| neighbours.contains(&right))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates nodes in ascending identifier order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Returns the edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Iterates the neighbours of `node` in ascending order, or returns
    /// `None` when the node is absent.
    pub fn neighbours(&self, node: NodeId) -> Option<impl Iterator<Item = NodeId> + '_> {
        self.adjacency
            .get(&node)
            .map(|neighbours| neighbours.iter().copied())
    }

    /// Number of edges incident to `node`, or `None` when the node is absent.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.adjacency.get(&node).map(BTreeSet::len)
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl Eq for Graph {}

use std::collections::HashMap;

use crate::graph::attributes::EdgeAttributes;
use crate::graph::traits::{Graph, NodeId};

/// Normalizes a raw node identifier: surrounding whitespace removed, upper-cased
pub fn normalize_node(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// An undirected edge and its attribute set
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub attributes: EdgeAttributes,
}

/// An undirected, simple graph implementation using adjacency lists.
///
/// Only [`GraphBuilder`](crate::graph::GraphBuilder) inserts nodes and edges; once built
/// the graph is read-only and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    /// Node labels, indexed by node id
    labels: Vec<String>,

    /// Normalized label -> node id
    index: HashMap<String, NodeId>,

    /// Adjacency for each node: node_id -> [(neighbor, edge index)]
    adjacency: Vec<Vec<(NodeId, usize)>>,

    /// Edge storage, one entry per unordered pair
    edges: Vec<Edge>,

    /// Unordered pair (smaller id first) -> edge index
    pairs: HashMap<(NodeId, NodeId), usize>,
}

impl UndirectedGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        UndirectedGraph::default()
    }

    /// Iterates over node labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Iterates over all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Looks up an edge by the labels of its endpoints
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&EdgeAttributes> {
        let a = self.node_id(a)?;
        let b = self.node_id(b)?;
        self.edge_attributes(a, b)
    }

    /// Returns the id of an already normalized label, inserting it when new
    pub(crate) fn intern_node(&mut self, label: String) -> NodeId {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        id
    }

    /// Stores the attribute set for the pair {a, b}.
    /// An existing set for the same pair is replaced entirely; returns true in that case.
    pub(crate) fn set_edge(&mut self, a: NodeId, b: NodeId, attributes: EdgeAttributes) -> bool {
        let key = (a.min(b), a.max(b));

        if let Some(&edge_idx) = self.pairs.get(&key) {
            self.edges[edge_idx].attributes = attributes;
            return true;
        }

        let edge_idx = self.edges.len();
        self.edges.push(Edge { a, b, attributes });
        self.pairs.insert(key, edge_idx);

        self.adjacency[a].push((b, edge_idx));
        if a != b {
            self.adjacency[b].push((a, edge_idx));
        }
        false
    }
}

impl Graph for UndirectedGraph {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(&normalize_node(label)).copied()
    }

    fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, &EdgeAttributes)> + '_> {
        match self.adjacency.get(node) {
            Some(adjacent) => Box::new(
                adjacent
                    .iter()
                    .map(move |&(neighbor, edge_idx)| (neighbor, &self.edges[edge_idx].attributes)),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    fn edge_attributes(&self, a: NodeId, b: NodeId) -> Option<&EdgeAttributes> {
        self.pairs
            .get(&(a.min(b), a.max(b)))
            .map(|&edge_idx| &self.edges[edge_idx].attributes)
    }
}

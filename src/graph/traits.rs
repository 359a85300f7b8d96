use std::fmt::Debug;

use crate::graph::attributes::EdgeAttributes;

/// Dense index of a node inside a graph
pub type NodeId = usize;

/// Trait representing a read-only, undirected graph with attributed edges
pub trait Graph: Debug + Send + Sync {
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of distinct (unordered) edges in the graph
    fn edge_count(&self) -> usize;

    /// Resolves an external node label to its index.
    /// The label is normalized the same way the builder normalizes identifiers.
    fn node_id(&self, label: &str) -> Option<NodeId>;

    /// Returns the label of a node
    fn label(&self, node: NodeId) -> Option<&str>;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Returns an iterator over the neighbors of a node together with the edge attributes
    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, &EdgeAttributes)> + '_>;

    /// Gets the attributes of the edge between two nodes, in either orientation
    fn edge_attributes(&self, a: NodeId, b: NodeId) -> Option<&EdgeAttributes>;

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_attributes(a, b).is_some()
    }

    /// Label used in error messages; falls back to the raw index
    fn display_label(&self, node: NodeId) -> String {
        self.label(node)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", node))
    }
}

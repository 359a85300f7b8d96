use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::weights::WeightSelector;
use crate::graph::{EdgeAttributes, Graph, NodeId};
use crate::{Error, Result};

/// Route found by an algorithm, detached from the graph it was computed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node labels from source to target, both included
    pub path: Vec<String>,

    /// Sum of the selected weight over consecutive edges of `path`
    pub total_weight: f64,
}

/// One edge of a route, with the attributes stored in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: String,
    pub to: String,
    pub attributes: EdgeAttributes,
}

impl PathResult {
    /// The trivial route of a node to itself
    pub fn single(node: impl Into<String>) -> Self {
        PathResult {
            path: vec![node.into()],
            total_weight: 0.0,
        }
    }

    /// Maps a route expressed in node ids to labels
    pub fn from_nodes<G: Graph + ?Sized>(graph: &G, nodes: &[NodeId], total_weight: f64) -> Self {
        PathResult {
            path: nodes.iter().map(|&node| graph.display_label(node)).collect(),
            total_weight,
        }
    }

    /// First node of the route; `None` only for a hand-built empty result
    pub fn source(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The graph edges lying on this route, in travel order
    pub fn edges<G: Graph + ?Sized>(&self, graph: &G) -> Vec<PathEdge> {
        self.path
            .windows(2)
            .filter_map(|pair| {
                let a = graph.node_id(&pair[0])?;
                let b = graph.node_id(&pair[1])?;
                let attributes = graph.edge_attributes(a, b)?;
                Some(PathEdge {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                    attributes: attributes.clone(),
                })
            })
            .collect()
    }
}

/// Route between two validated, distinct nodes, as produced by an algorithm body
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath {
    pub nodes: Vec<NodeId>,
    pub total_weight: f64,
}

/// Builds the error reported when no route connects two nodes
pub fn no_path<G: Graph + ?Sized>(graph: &G, source: NodeId, target: NodeId) -> Error {
    Error::NoPath {
        from: graph.display_label(source),
        to: graph.display_label(target),
    }
}

/// Trait for point-to-point shortest path algorithms
pub trait PathAlgorithm<G>: Send + Sync
where
    G: Graph + ?Sized,
{
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Runs the algorithm body.
    ///
    /// Callers guarantee that both nodes exist and that `source != target`.
    fn search(&self, graph: &G, source: NodeId, target: NodeId, weights: &WeightSelector) -> Result<NodePath>;

    /// Find the shortest route between two node labels.
    ///
    /// Unknown labels fail with [`Error::InvalidNode`] before the algorithm runs, and a
    /// query from a node to itself returns the single-node route without searching.
    fn find_path(&self, graph: &G, source: &str, target: &str, weights: &WeightSelector) -> Result<PathResult> {
        let source_id = graph
            .node_id(source)
            .ok_or_else(|| Error::InvalidNode(source.trim().to_string()))?;
        let target_id = graph
            .node_id(target)
            .ok_or_else(|| Error::InvalidNode(target.trim().to_string()))?;

        if source_id == target_id {
            return Ok(PathResult::single(graph.display_label(source_id)));
        }

        debug!(
            "{}: searching {} -> {} weighted by '{}'",
            self.name(),
            graph.display_label(source_id),
            graph.display_label(target_id),
            weights.key()
        );
        let found = self.search(graph, source_id, target_id, weights)?;
        Ok(PathResult::from_nodes(graph, &found.nodes, found.total_weight))
    }
}

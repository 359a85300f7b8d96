use ordered_float::OrderedFloat;

use crate::algorithm::reconstruct::reconstruct;
use crate::algorithm::traits::{no_path, NodePath, PathAlgorithm};
use crate::algorithm::weights::WeightSelector;
use crate::data_structures::Frontier;
use crate::graph::{Graph, NodeId};
use crate::Result;

/// Heuristic that never estimates any remaining cost
pub type ZeroHeuristic = fn(&str, &str) -> f64;

/// Estimates nothing; A* with this heuristic behaves like Dijkstra
pub fn zero_heuristic(_node: &str, _target: &str) -> f64 {
    0.0
}

/// A* search guided by a heuristic `h(node, target)` over node labels.
///
/// The heuristic must not overestimate the remaining cost for the result to be optimal.
/// Negative or non-finite estimates are treated as zero.
#[derive(Debug, Clone, Copy)]
pub struct AStar<H = ZeroHeuristic> {
    heuristic: H,
}

impl AStar<ZeroHeuristic> {
    /// Creates an A* instance with the zero heuristic
    pub fn new() -> Self {
        AStar {
            heuristic: zero_heuristic,
        }
    }
}

impl Default for AStar<ZeroHeuristic> {
    fn default() -> Self {
        AStar::new()
    }
}

impl<H> AStar<H>
where
    H: Fn(&str, &str) -> f64 + Send + Sync,
{
    /// Creates an A* instance with a caller-supplied heuristic
    pub fn with_heuristic(heuristic: H) -> Self {
        AStar { heuristic }
    }

    fn estimate(&self, node: &str, target: &str) -> f64 {
        let h = (self.heuristic)(node, target);
        if h.is_finite() && h > 0.0 {
            h
        } else {
            0.0
        }
    }
}

impl<G, H> PathAlgorithm<G> for AStar<H>
where
    G: Graph + ?Sized,
    H: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn name(&self) -> &'static str {
        "A*"
    }

    fn search(&self, graph: &G, source: NodeId, target: NodeId, weights: &WeightSelector) -> Result<NodePath> {
        let n = graph.node_count();
        let target_label = graph.display_label(target);

        let mut g_scores: Vec<Option<f64>> = vec![None; n];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; n];
        let mut estimates: Vec<Option<f64>> = vec![None; n];

        let mut h = |node: NodeId| -> f64 {
            *estimates[node].get_or_insert_with(|| {
                let label = graph.display_label(node);
                self.estimate(&label, &target_label)
            })
        };

        g_scores[source] = Some(0.0);
        // Entries carry their g score so stale ones can be recognised when popped
        let mut frontier = Frontier::with_start((source, OrderedFloat(0.0)), h(source));

        while let Some(((u, g_u), _)) = frontier.pop() {
            let g_u = g_u.into_inner();
            if g_scores[u].map_or(false, |best| g_u > best) {
                continue;
            }

            if u == target {
                return Ok(NodePath {
                    nodes: reconstruct(&predecessors, source, target)?,
                    total_weight: g_u,
                });
            }

            for (v, attributes) in graph.neighbors(u) {
                let weight = weights.weight(graph, u, v, attributes)?;
                let tentative = g_u + weight;

                if g_scores[v].map_or(true, |current| tentative < current) {
                    g_scores[v] = Some(tentative);
                    predecessors[v] = Some(u);
                    frontier.push((v, OrderedFloat(tentative)), tentative + h(v));
                }
            }
        }

        Err(no_path(graph, source, target))
    }
}

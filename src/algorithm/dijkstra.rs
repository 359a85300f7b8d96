use crate::algorithm::reconstruct::reconstruct;
use crate::algorithm::traits::{no_path, NodePath, PathAlgorithm};
use crate::algorithm::weights::WeightSelector;
use crate::data_structures::Frontier;
use crate::graph::{Graph, NodeId};
use crate::{Error, Result};

/// Distances and predecessors computed by a single-source search
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    /// Distances from source to each node
    pub distances: Vec<Option<f64>>,

    /// Predecessor nodes in the shortest path tree
    pub predecessors: Vec<Option<NodeId>>,

    /// Source node ID
    pub source: NodeId,
}

impl ShortestPathTree {
    /// Path from the tree's source to `target`, if it was reached
    pub fn path_to(&self, target: NodeId) -> Option<Result<Vec<NodeId>>> {
        self.distances
            .get(target)
            .copied()
            .flatten()
            .map(|_| reconstruct(&self.predecessors, self.source, target))
    }
}

/// Classic Dijkstra's algorithm implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Compute shortest paths from a source node to every reachable node
    pub fn shortest_path_tree<G: Graph + ?Sized>(
        &self,
        graph: &G,
        source: NodeId,
        weights: &WeightSelector,
    ) -> Result<ShortestPathTree> {
        if !graph.has_node(source) {
            return Err(Error::InvalidNode(format!("#{}", source)));
        }
        self.run(graph, source, None, weights)
    }

    fn run<G: Graph + ?Sized>(
        &self,
        graph: &G,
        source: NodeId,
        target: Option<NodeId>,
        weights: &WeightSelector,
    ) -> Result<ShortestPathTree> {
        let n = graph.node_count();

        let mut distances: Vec<Option<f64>> = vec![None; n];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; n];
        let mut settled = vec![false; n];

        distances[source] = Some(0.0);
        let mut frontier = Frontier::with_start(source, 0.0);

        while let Some((u, dist_u)) = frontier.pop() {
            // Stale entry, u was already settled with a shorter distance
            if settled[u] {
                continue;
            }
            settled[u] = true;

            if Some(u) == target {
                break;
            }

            for (v, attributes) in graph.neighbors(u) {
                let weight = weights.weight(graph, u, v, attributes)?;
                if settled[v] {
                    continue;
                }

                let new_dist = dist_u + weight;
                let should_update = match distances[v] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };

                if should_update {
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    frontier.push(v, new_dist);
                }
            }
        }

        Ok(ShortestPathTree {
            distances,
            predecessors,
            source,
        })
    }
}

impl<G> PathAlgorithm<G> for Dijkstra
where
    G: Graph + ?Sized,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn search(&self, graph: &G, source: NodeId, target: NodeId, weights: &WeightSelector) -> Result<NodePath> {
        let tree = self.run(graph, source, Some(target), weights)?;

        match tree.distances[target] {
            Some(total_weight) => Ok(NodePath {
                nodes: reconstruct(&tree.predecessors, source, target)?,
                total_weight,
            }),
            None => Err(no_path(graph, source, target)),
        }
    }
}

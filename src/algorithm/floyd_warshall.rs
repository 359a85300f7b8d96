use log::debug;
use rayon::prelude::*;

use crate::algorithm::reconstruct::reconstruct;
use crate::algorithm::traits::{no_path, NodePath, PathAlgorithm};
use crate::algorithm::weights::WeightSelector;
use crate::graph::{Graph, NodeId};
use crate::Result;

/// Distance and predecessor tables for every pair of nodes
#[derive(Debug, Clone)]
pub struct AllPairs {
    /// `distances[u][v]`, infinite when v is unreachable from u
    distances: Vec<Vec<f64>>,

    /// `predecessors[u][v]` is the node preceding v on the shortest path from u
    predecessors: Vec<Vec<Option<NodeId>>>,
}

impl AllPairs {
    pub fn node_count(&self) -> usize {
        self.distances.len()
    }

    /// Shortest distance from `u` to `v`, `None` when unreachable
    pub fn distance(&self, u: NodeId, v: NodeId) -> Option<f64> {
        let d = *self.distances.get(u)?.get(v)?;
        if d.is_finite() {
            Some(d)
        } else {
            None
        }
    }

    /// Predecessor row of `u`, indexed by destination node
    pub fn predecessor_row(&self, u: NodeId) -> &[Option<NodeId>] {
        self.predecessors.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shortest path from `u` to `v`; `Ok(None)` when unreachable
    pub fn path(&self, u: NodeId, v: NodeId) -> Result<Option<Vec<NodeId>>> {
        match self.distance(u, v) {
            Some(_) => reconstruct(self.predecessor_row(u), u, v).map(Some),
            None => Ok(None),
        }
    }
}

/// Floyd-Warshall all-pairs shortest paths, O(V^3) time and O(V^2) space
#[derive(Debug, Clone, Copy)]
pub struct FloydWarshall {
    /// Graphs with at least this many nodes relax rows in parallel
    parallel_threshold: usize,
}

impl Default for FloydWarshall {
    fn default() -> Self {
        FloydWarshall::new()
    }
}

impl FloydWarshall {
    pub fn new() -> Self {
        FloydWarshall {
            parallel_threshold: 128,
        }
    }

    /// Set the node count from which rows are relaxed on the rayon pool
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Computes the distance and predecessor tables for the whole graph
    pub fn all_pairs<G: Graph + ?Sized>(&self, graph: &G, weights: &WeightSelector) -> Result<AllPairs> {
        let n = graph.node_count();
        let mut distances = vec![vec![f64::INFINITY; n]; n];
        let mut predecessors: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; n];

        for u in 0..n {
            distances[u][u] = 0.0;
            for (v, attributes) in graph.neighbors(u) {
                let weight = weights.weight(graph, u, v, attributes)?;
                if u != v && weight < distances[u][v] {
                    distances[u][v] = weight;
                    predecessors[u][v] = Some(u);
                }
            }
        }

        let parallel = n >= self.parallel_threshold;
        debug!("Floyd-Warshall over {} nodes (parallel: {})", n, parallel);

        for k in 0..n {
            // Row k does not change while k is the intermediate node
            let dist_k = distances[k].clone();
            let pred_k = predecessors[k].clone();

            let relax_row = |(dist_i, pred_i): (&mut Vec<f64>, &mut Vec<Option<NodeId>>)| {
                let d_ik = dist_i[k];
                if d_ik.is_infinite() {
                    return;
                }
                for j in 0..n {
                    let candidate = d_ik + dist_k[j];
                    if candidate < dist_i[j] {
                        dist_i[j] = candidate;
                        pred_i[j] = pred_k[j];
                    }
                }
            };

            if parallel {
                distances
                    .par_iter_mut()
                    .zip(predecessors.par_iter_mut())
                    .for_each(relax_row);
            } else {
                distances
                    .iter_mut()
                    .zip(predecessors.iter_mut())
                    .for_each(relax_row);
            }
        }

        Ok(AllPairs {
            distances,
            predecessors,
        })
    }
}

impl<G> PathAlgorithm<G> for FloydWarshall
where
    G: Graph + ?Sized,
{
    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn search(&self, graph: &G, source: NodeId, target: NodeId, weights: &WeightSelector) -> Result<NodePath> {
        let table = self.all_pairs(graph, weights)?;

        match table.distance(source, target) {
            Some(total_weight) => Ok(NodePath {
                nodes: reconstruct(table.predecessor_row(source), source, target)?,
                total_weight,
            }),
            None => Err(no_path(graph, source, target)),
        }
    }
}

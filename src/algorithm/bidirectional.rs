use log::debug;

use crate::algorithm::reconstruct::reconstruct;
use crate::algorithm::traits::{no_path, NodePath, PathAlgorithm};
use crate::algorithm::weights::WeightSelector;
use crate::data_structures::Frontier;
use crate::graph::{Graph, NodeId};
use crate::Result;

/// State of one search direction
#[derive(Debug)]
struct SearchSide {
    distances: Vec<Option<f64>>,
    predecessors: Vec<Option<NodeId>>,
    settled: Vec<bool>,
    frontier: Frontier<NodeId>,
}

impl SearchSide {
    fn new(n: usize, start: NodeId) -> Self {
        let mut distances = vec![None; n];
        distances[start] = Some(0.0);
        SearchSide {
            distances,
            predecessors: vec![None; n],
            settled: vec![false; n],
            frontier: Frontier::with_start(start, 0.0),
        }
    }
}

/// Best meeting found so far: cost, node on the forward side, node on the backward side
#[derive(Debug, Clone, Copy)]
struct Meeting {
    cost: f64,
    forward: NodeId,
    backward: NodeId,
}

/// Bidirectional Dijkstra: one search from the source, one from the target, meeting in the middle
#[derive(Debug, Default, Clone, Copy)]
pub struct BidirectionalDijkstra;

impl BidirectionalDijkstra {
    pub fn new() -> Self {
        BidirectionalDijkstra
    }
}

impl<G> PathAlgorithm<G> for BidirectionalDijkstra
where
    G: Graph + ?Sized,
{
    fn name(&self) -> &'static str {
        "Bidirectional Dijkstra"
    }

    fn search(&self, graph: &G, source: NodeId, target: NodeId, weights: &WeightSelector) -> Result<NodePath> {
        let n = graph.node_count();
        let mut forward = SearchSide::new(n, source);
        let mut backward = SearchSide::new(n, target);
        let mut best: Option<Meeting> = None;
        let mut forward_turn = true;

        loop {
            let (current, other) = if forward_turn {
                (&mut forward, &backward)
            } else {
                (&mut backward, &forward)
            };

            let Some((u, dist_u)) = current.frontier.pop() else {
                break;
            };
            if current.settled[u] {
                continue;
            }
            current.settled[u] = true;

            // u is final in both directions, the best meeting cannot improve any more
            if other.settled[u] {
                break;
            }

            for (v, attributes) in graph.neighbors(u) {
                let weight = weights.weight(graph, u, v, attributes)?;
                if v == u {
                    continue;
                }

                let new_dist = dist_u + weight;
                if !current.settled[v] && current.distances[v].map_or(true, |d| new_dist < d) {
                    current.distances[v] = Some(new_dist);
                    current.predecessors[v] = Some(u);
                    current.frontier.push(v, new_dist);
                }

                if let Some(dist_other) = other.distances[v] {
                    let cost = new_dist + dist_other;
                    if best.map_or(true, |meeting| cost < meeting.cost) {
                        let (forward_node, backward_node) = if forward_turn { (u, v) } else { (v, u) };
                        best = Some(Meeting {
                            cost,
                            forward: forward_node,
                            backward: backward_node,
                        });
                    }
                }
            }

            forward_turn = !forward_turn;
        }

        let meeting = best.ok_or_else(|| no_path(graph, source, target))?;
        debug!(
            "Bidirectional search met on edge {}-{} with cost {}",
            graph.display_label(meeting.forward),
            graph.display_label(meeting.backward),
            meeting.cost
        );

        let mut nodes = reconstruct(&forward.predecessors, source, meeting.forward)?;
        let suffix = reconstruct(&backward.predecessors, target, meeting.backward)?;
        nodes.extend(suffix.into_iter().rev());

        Ok(NodePath {
            nodes,
            total_weight: meeting.cost,
        })
    }
}

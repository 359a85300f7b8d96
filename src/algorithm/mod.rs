pub mod astar;
pub mod bidirectional;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod reconstruct;
pub mod traits;
pub mod weights;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use reconstruct::reconstruct;
pub use traits::{NodePath, PathAlgorithm, PathEdge, PathResult};
pub use weights::WeightSelector;

use crate::graph::Graph;
use crate::Result;
use astar::AStar;
use bidirectional::BidirectionalDijkstra;
use dijkstra::Dijkstra;
use floyd_warshall::FloydWarshall;

/// The interchangeable route algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dijkstra,
    #[serde(alias = "astar")]
    AStar,
    FloydWarshall,
    #[serde(alias = "bidirectional")]
    BidirectionalDijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::FloydWarshall,
        Algorithm::BidirectionalDijkstra,
    ];

    /// Get the name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::FloydWarshall => "Floyd-Warshall",
            Algorithm::BidirectionalDijkstra => "Bidirectional Dijkstra",
        }
    }

    /// Runs this algorithm with its default configuration (A* uses the zero heuristic)
    pub fn find_path<G: Graph + ?Sized>(
        &self,
        graph: &G,
        source: &str,
        target: &str,
        weights: &WeightSelector,
    ) -> Result<PathResult> {
        match self {
            Algorithm::Dijkstra => Dijkstra::new().find_path(graph, source, target, weights),
            Algorithm::AStar => AStar::new().find_path(graph, source, target, weights),
            Algorithm::FloydWarshall => FloydWarshall::new().find_path(graph, source, target, weights),
            Algorithm::BidirectionalDijkstra => {
                BidirectionalDijkstra::new().find_path(graph, source, target, weights)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for algorithm names that match none of the known algorithms
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        match normalized.as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            "floydwarshall" => Ok(Algorithm::FloydWarshall),
            "bidirectional" | "bidirectionaldijkstra" => Ok(Algorithm::BidirectionalDijkstra),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Everything needed to answer one route question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub algorithm: Algorithm,
    pub source: String,
    pub target: String,
    pub weights: WeightSelector,
}

impl RouteQuery {
    pub fn new(
        algorithm: Algorithm,
        source: impl Into<String>,
        target: impl Into<String>,
        weight_key: impl Into<String>,
    ) -> Self {
        RouteQuery {
            algorithm,
            source: source.into(),
            target: target.into(),
            weights: WeightSelector::new(weight_key),
        }
    }

    /// Use a default weight for edges lacking the weight key
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.weights = self.weights.with_default(weight);
        self
    }

    /// Answers the query synchronously
    pub fn run<G: Graph + ?Sized>(&self, graph: &G) -> Result<PathResult> {
        self.algorithm
            .find_path(graph, &self.source, &self.target, &self.weights)
    }
}

//! Flight Routes - shortest routes over a weighted airport graph
//!
//! The crate builds an immutable, undirected graph from flight segment records and
//! answers route queries with four interchangeable algorithms: Dijkstra, A*,
//! Floyd-Warshall and bidirectional Dijkstra. Every algorithm goes through the same
//! query contract and returns a [`PathResult`] or a typed [`Error`]. Long-running
//! queries can be moved off the caller's thread with [`PathExecutor`].

pub mod algorithm;
pub mod data_structures;
pub mod executor;
pub mod graph;
pub mod web;

pub use algorithm::{
    astar::AStar, bidirectional::BidirectionalDijkstra, dijkstra::Dijkstra,
    floyd_warshall::FloydWarshall, Algorithm, PathAlgorithm, PathResult, RouteQuery,
    WeightSelector,
};
pub use executor::{CancelToken, PathExecutor, PathHandle};
/// Re-export main types for convenient use
pub use graph::{build, EdgeRecord, GraphBuilder, UndirectedGraph};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed edge record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("No path found between {from} and {to}")]
    NoPath { from: String, to: String },

    #[error("Corrupted predecessor chain: {0}")]
    CorruptedPredecessor(String),

    #[error("Negative weight {weight} for '{key}' on edge {from}-{to}")]
    NegativeWeight {
        key: String,
        from: String,
        to: String,
        weight: f64,
    },

    #[error("Edge {from}-{to} has no usable numeric '{key}' attribute")]
    InvalidWeight { key: String, from: String, to: String },

    #[error("Path query was cancelled")]
    Cancelled,

    #[error("Path worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

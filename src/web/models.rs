use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::{Algorithm, PathEdge};

fn default_weight_key() -> String {
    "air_time".to_string()
}

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
    pub degree: usize,
}

/// Represents an edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: String,
    pub target: String,
    /// Value of the requested weight key, absent when the edge has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Represents a complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// Query string for graph export
#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    #[serde(default = "default_weight_key")]
    pub weight_key: String,
}

/// Parameters for a route computation
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub algorithm: Algorithm,
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight_key")]
    pub weight_key: String,
    #[serde(default)]
    pub default_weight: Option<f64>,
}

/// Response containing a computed route
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub algorithm: Algorithm,
    pub source: String,
    pub target: String,
    pub weight_key: String,
    pub path: Vec<String>,
    pub total_weight: f64,
    /// Edges on the route, for highlighting
    pub edges: Vec<PathEdge>,
    pub execution_time_ms: f64,
    pub created_at: DateTime<Utc>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::{RouteQuery, WeightSelector};
use crate::executor::PathExecutor;
use crate::graph::{Graph, UndirectedGraph};
use crate::web::models::*;
use crate::Error;

/// Rejection type shared by all handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Recently computed routes, oldest evicted first
#[derive(Debug, Default)]
pub struct RouteHistory {
    routes: HashMap<Uuid, RouteResponse>,
    order: VecDeque<Uuid>,
}

impl RouteHistory {
    fn insert(&mut self, route: RouteResponse, capacity: usize) {
        self.order.push_back(route.id);
        self.routes.insert(route.id, route);
        while self.order.len() > capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.routes.remove(&evicted);
            }
        }
    }

    fn get(&self, id: &Uuid) -> Option<&RouteResponse> {
        self.routes.get(id)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<UndirectedGraph>,
    pub executor: PathExecutor,
    history: Arc<Mutex<RouteHistory>>,
    max_history: usize,
}

impl AppState {
    pub fn new(graph: Arc<UndirectedGraph>, executor: PathExecutor, max_history: usize) -> Self {
        Self {
            graph,
            executor,
            history: Arc::new(Mutex::new(RouteHistory::default())),
            max_history: max_history.max(1),
        }
    }

    fn history(&self) -> MutexGuard<'_, RouteHistory> {
        // The history only caches responses, a poisoned lock still holds usable data
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/airports", get(list_airports))
        .route("/api/graph", get(get_graph))
        .route("/api/routes", post(create_route))
        .route("/api/routes/:route_id", get(get_route))
}

/// Maps a library error to an HTTP status and JSON body
pub fn error_response(err: &Error) -> ApiError {
    let (status, code) = match err {
        Error::InvalidNode(_) => (StatusCode::BAD_REQUEST, "invalid_node"),
        Error::MalformedRecord { .. } => (StatusCode::BAD_REQUEST, "malformed_record"),
        Error::NoPath { .. } => (StatusCode::NOT_FOUND, "no_path"),
        Error::NegativeWeight { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "negative_weight"),
        Error::InvalidWeight { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_weight"),
        Error::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "cancelled"),
        Error::CorruptedPredecessor(_) | Error::Worker(_) | Error::Csv(_) | Error::Io(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "airports": state.graph.node_count(),
        "routes": state.graph.edge_count(),
    }))
}

/// Sorted list of airport codes
pub async fn list_airports(State(state): State<AppState>) -> Json<Vec<String>> {
    let mut airports: Vec<String> = state.graph.labels().map(str::to_string).collect();
    airports.sort();
    Json(airports)
}

/// Export the graph for rendering, weighted by the requested key
pub async fn get_graph(State(state): State<AppState>, Query(query): Query<GraphQuery>) -> Json<WebGraph> {
    let graph = state.graph.as_ref();

    let nodes = graph
        .labels()
        .enumerate()
        .map(|(id, label)| WebNode {
            id,
            label: label.to_string(),
            degree: graph.neighbors(id).count(),
        })
        .collect();

    let links = graph
        .edges()
        .map(|edge| WebEdge {
            source: graph.display_label(edge.a),
            target: graph.display_label(edge.b),
            weight: edge.attributes.number(&query.weight_key),
        })
        .collect();

    Json(WebGraph { nodes, links })
}

/// Compute a route with the requested algorithm
pub async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let mut weights = WeightSelector::new(request.weight_key.clone());
    if let Some(default_weight) = request.default_weight {
        weights = weights.with_default(default_weight);
    }
    let query = RouteQuery {
        algorithm: request.algorithm,
        source: request.source.clone(),
        target: request.target.clone(),
        weights,
    };

    let start_time = Instant::now();
    let handle = state.executor.submit_query(state.graph.clone(), query);
    let id = handle.id();
    let outcome = handle.result().await;
    let execution_time = start_time.elapsed();

    let result = outcome.map_err(|err| {
        warn!("Route {} -> {} ({}) failed: {}", request.source, request.target, request.algorithm, err);
        error_response(&err)
    })?;

    info!(
        "{}: {} in {:.2} ms",
        request.algorithm,
        result.path.join(" -> "),
        execution_time.as_secs_f64() * 1000.0
    );

    let response = RouteResponse {
        id,
        algorithm: request.algorithm,
        source: result.source().unwrap_or(request.source.trim()).to_string(),
        target: result.target().unwrap_or(request.target.trim()).to_string(),
        weight_key: request.weight_key,
        edges: result.edges(state.graph.as_ref()),
        path: result.path,
        total_weight: result.total_weight,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        created_at: chrono::Utc::now(),
    };

    state.history().insert(response.clone(), state.max_history);

    Ok(Json(response))
}

/// Get a previously computed route
pub async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteResponse>, ApiError> {
    match state.history().get(&route_id) {
        Some(route) => Ok(Json(route.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "route_not_found".to_string(),
                message: format!("Route {} not found", route_id),
            }),
        )),
    }
}

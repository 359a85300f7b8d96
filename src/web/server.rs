use axum::{
    http::{header, Method},
    Router,
};
use log::info;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::executor::PathExecutor;
use crate::graph::{build, load_flights_csv, FlightCsvOptions, Graph};
use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    /// CSV file with one flight segment per row
    pub data_path: PathBuf,
    pub csv: FlightCsvOptions,
    pub enable_cors: bool,
    /// Number of computed routes kept for `GET /api/routes/:id`
    pub max_history: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3005,
            data_path: PathBuf::from("flights.csv"),
            csv: FlightCsvOptions::default(),
            enable_cors: true,
            max_history: 1000,
        }
    }
}

/// Build the application router with middleware
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new().merge(create_router());

    let app = if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    };

    app.with_state(state)
}

/// Load the flight data and serve the route API until the process stops
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_flights_csv(&config.data_path, &config.csv)?;
    let graph = Arc::new(build(records)?);
    info!(
        "Serving {} airports and {} connections",
        graph.node_count(),
        graph.edge_count()
    );

    let state = AppState::new(graph, PathExecutor::current(), config.max_history);
    let app = build_app(state, config.enable_cors);

    let addr = SocketAddr::new(config.bind_address, config.port);
    info!("Flight route server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use flight_routes::web::{start_server, ServerConfig};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments: <flights.csv> [port]
    let args: Vec<String> = env::args().collect();
    let defaults = ServerConfig::default();

    let data_path = args.get(1).map(PathBuf::from).unwrap_or(defaults.data_path.clone());
    let port = match args.get(2) {
        Some(raw) => raw
            .parse()
            .map_err(|err| format!("invalid port '{}': {}", raw, err))?,
        None => defaults.port,
    };

    let config = ServerConfig {
        data_path,
        port,
        ..defaults
    };

    println!("Starting flight route server");
    println!("   Data file: {}", config.data_path.display());
    println!("   Address: {}:{}", config.bind_address, config.port);
    println!("   CORS enabled: {}", config.enable_cors);

    start_server(config).await
}

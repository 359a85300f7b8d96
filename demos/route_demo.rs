use flight_routes::algorithm::astar::AStar;
use flight_routes::algorithm::{Algorithm, PathAlgorithm, RouteQuery, WeightSelector};
use flight_routes::executor::PathExecutor;
use flight_routes::graph::{build, EdgeAttributes, EdgeRecord, Graph};
use std::sync::Arc;

fn segment(origin: &str, dest: &str, distance: f64, air_time: f64, carrier: &str) -> EdgeRecord {
    EdgeRecord::new(
        origin,
        dest,
        EdgeAttributes::new()
            .with("distance", distance)
            .with("air_time", air_time)
            .with("name", carrier),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let graph = Arc::new(build(vec![
        segment("JFK", "ORD", 740.0, 150.0, "American Airlines Inc."),
        segment("JFK", "ATL", 760.0, 110.0, "Delta Air Lines Inc."),
        segment("ORD", "DEN", 888.0, 110.0, "United Air Lines Inc."),
        segment("ATL", "DEN", 1199.0, 170.0, "Delta Air Lines Inc."),
        segment("DEN", "SFO", 967.0, 130.0, "United Air Lines Inc."),
        segment("ATL", "IAH", 689.0, 100.0, "ExpressJet Airlines Inc."),
        segment("IAH", "SFO", 1635.0, 230.0, "United Air Lines Inc."),
        // Later record for the same pair replaces the first one
        segment("JFK", "ORD", 740.0, 140.0, "JetBlue Airways"),
    ])?);

    println!("--- {} airports, {} connections ---", graph.node_count(), graph.edge_count());

    let weights = WeightSelector::new("air_time");
    for algorithm in Algorithm::ALL {
        match algorithm.find_path(graph.as_ref(), "jfk", "sfo", &weights) {
            Ok(result) => println!(
                "{:<24} {}  ({:.2} minutes)",
                algorithm.name(),
                result.path.join(" -> "),
                result.total_weight
            ),
            Err(err) => println!("{:<24} error: {}", algorithm.name(), err),
        }
    }

    // Every leg in this network takes at least 100 minutes, so 60 never overestimates
    let astar = AStar::with_heuristic(|node: &str, target: &str| if node == target { 0.0 } else { 60.0 });
    let result = astar.find_path(graph.as_ref(), "ATL", "SFO", &WeightSelector::new("air_time"))?;
    println!("\nA* (guided) ATL -> SFO: {} ({:.2})", result.path.join(" -> "), result.total_weight);

    // The same queries, off the main thread
    let executor = PathExecutor::current();
    let handles: Vec<_> = Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            executor.submit_query(graph.clone(), RouteQuery::new(algorithm, "SFO", "JFK", "distance"))
        })
        .collect();

    println!();
    for handle in handles {
        let id = handle.id();
        let result = handle.result().await?;
        println!("[{}] {} ({:.0} miles)", id, result.path.join(" -> "), result.total_weight);
        for edge in result.edges(graph.as_ref()) {
            if let Some(carrier) = edge.attributes.get("name") {
                println!("    {} - {}: {}", edge.from, edge.to, carrier);
            }
        }
    }

    Ok(())
}

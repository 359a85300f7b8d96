use flight_routes::algorithm::astar::AStar;
use flight_routes::algorithm::bidirectional::BidirectionalDijkstra;
use flight_routes::algorithm::dijkstra::Dijkstra;
use flight_routes::algorithm::floyd_warshall::FloydWarshall;
use flight_routes::algorithm::{
    Algorithm, NodePath, PathAlgorithm, PathResult, RouteQuery, WeightSelector,
};
use flight_routes::graph::{
    build, read_flight_records, EdgeAttributes, EdgeRecord, FlightCsvOptions, Graph, NodeId,
    UndirectedGraph,
};
use flight_routes::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

const EPSILON: f64 = 1e-9;

fn flight(origin: &str, dest: &str, air_time: f64, distance: f64) -> EdgeRecord {
    EdgeRecord::new(
        origin,
        dest,
        EdgeAttributes::new()
            .with("air_time", air_time)
            .with("distance", distance)
            .with("name", "Test Air"),
    )
}

// Small airport network with a separate island component
fn create_test_network() -> UndirectedGraph {
    build(vec![
        flight("JFK", "BOS", 40.0, 187.0),
        flight("BOS", "ORD", 120.0, 867.0),
        flight("JFK", "ORD", 150.0, 740.0),
        flight("ORD", "DEN", 110.0, 888.0),
        flight("JFK", "ATL", 110.0, 760.0),
        flight("ATL", "DEN", 170.0, 1199.0),
        flight("DEN", "SFO", 130.0, 967.0),
        flight("ATL", "ORD", 90.0, 606.0),
        flight("HNL", "OGG", 30.0, 100.0),
    ])
    .unwrap()
}

fn path_weight(graph: &UndirectedGraph, result: &PathResult, key: &str) -> f64 {
    result
        .edges(graph)
        .iter()
        .map(|edge| edge.attributes.number(key).unwrap())
        .sum()
}

#[test]
fn test_all_algorithms_find_the_fastest_route() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");

    for algorithm in Algorithm::ALL {
        let result = algorithm.find_path(&graph, "JFK", "SFO", &weights).unwrap();
        assert!(
            (result.total_weight - 390.0).abs() < EPSILON,
            "{} reported {}",
            algorithm,
            result.total_weight
        );
        assert_eq!(result.path, vec!["JFK", "ORD", "DEN", "SFO"], "{}", algorithm);
        assert!((path_weight(&graph, &result, "air_time") - result.total_weight).abs() < EPSILON);
    }
}

#[test]
fn test_weight_key_changes_the_route_cost() {
    let graph = create_test_network();
    let weights = WeightSelector::new("distance");

    for algorithm in Algorithm::ALL {
        let result = algorithm.find_path(&graph, "jfk", "sfo", &weights).unwrap();
        assert!((result.total_weight - 2595.0).abs() < EPSILON, "{}", algorithm);
        assert_eq!(result.source(), Some("JFK"));
        assert_eq!(result.target(), Some("SFO"));
    }
}

#[test]
fn test_same_source_and_target_is_trivial() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");

    for algorithm in Algorithm::ALL {
        let result = algorithm.find_path(&graph, "DEN", "den", &weights).unwrap();
        assert_eq!(result, PathResult::single("DEN"), "{}", algorithm);
        assert_eq!(result.hops(), 0);
    }
}

#[test]
fn test_unreachable_pair_reports_no_path() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");

    for algorithm in Algorithm::ALL {
        let err = algorithm.find_path(&graph, "JFK", "HNL", &weights).unwrap_err();
        assert!(matches!(err, Error::NoPath { .. }), "{} returned {:?}", algorithm, err);
    }
}

#[test]
fn test_unknown_airport_is_invalid_node() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");

    for algorithm in Algorithm::ALL {
        let err = algorithm.find_path(&graph, "XXX", "SFO", &weights).unwrap_err();
        assert!(matches!(err, Error::InvalidNode(ref node) if node == "XXX"), "{}", algorithm);

        let err = algorithm.find_path(&graph, "JFK", "", &weights).unwrap_err();
        assert!(matches!(err, Error::InvalidNode(_)), "{}", algorithm);
    }
}

// Delegates to Dijkstra and counts how often the algorithm body runs
#[derive(Default)]
struct CountingAlgorithm {
    calls: AtomicUsize,
}

impl PathAlgorithm<UndirectedGraph> for CountingAlgorithm {
    fn name(&self) -> &'static str {
        "Counting"
    }

    fn search(
        &self,
        graph: &UndirectedGraph,
        source: NodeId,
        target: NodeId,
        weights: &WeightSelector,
    ) -> Result<NodePath> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Dijkstra::new().search(graph, source, target, weights)
    }
}

#[test]
fn test_precondition_failures_never_reach_the_algorithm_body() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");
    let algorithm = CountingAlgorithm::default();

    assert!(matches!(
        algorithm.find_path(&graph, "JFK", "NOWHERE", &weights),
        Err(Error::InvalidNode(_))
    ));
    assert!(matches!(
        algorithm.find_path(&graph, "NOWHERE", "JFK", &weights),
        Err(Error::InvalidNode(_))
    ));
    assert_eq!(algorithm.find_path(&graph, "ORD", "ORD", &weights).unwrap().path, vec!["ORD"]);
    assert_eq!(algorithm.calls.load(Ordering::SeqCst), 0);

    algorithm.find_path(&graph, "JFK", "ORD", &weights).unwrap();
    assert_eq!(algorithm.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_negative_weight_is_rejected_by_every_algorithm() {
    let graph = build(vec![
        flight("A", "B", 10.0, 1.0),
        flight("B", "C", -5.0, 1.0),
        flight("C", "D", 10.0, 1.0),
    ])
    .unwrap();
    let weights = WeightSelector::new("air_time");

    for algorithm in Algorithm::ALL {
        let err = algorithm.find_path(&graph, "A", "D", &weights).unwrap_err();
        assert!(
            matches!(err, Error::NegativeWeight { weight, .. } if weight == -5.0),
            "{} returned {:?}",
            algorithm,
            err
        );
    }
}

#[test]
fn test_missing_weight_is_invalid_unless_defaulted() {
    let graph = build(vec![
        EdgeRecord::new("A", "B", EdgeAttributes::new().with("air_time", 10.0)),
        EdgeRecord::new("B", "C", EdgeAttributes::new().with("name", "Delta")),
    ])
    .unwrap();

    for algorithm in Algorithm::ALL {
        let err = algorithm
            .find_path(&graph, "A", "C", &WeightSelector::new("air_time"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }), "{} returned {:?}", algorithm, err);

        let result = algorithm
            .find_path(&graph, "A", "C", &WeightSelector::new("air_time").with_default(1.0))
            .unwrap();
        assert!((result.total_weight - 11.0).abs() < EPSILON, "{}", algorithm);
    }
}

#[test]
fn test_textual_weight_is_invalid_even_with_default() {
    let graph = build(vec![EdgeRecord::new(
        "C",
        "D",
        EdgeAttributes::new().with("air_time", "n/a"),
    )])
    .unwrap();
    let weights = WeightSelector::new("air_time").with_default(1.0);

    for algorithm in Algorithm::ALL {
        let err = algorithm.find_path(&graph, "C", "D", &weights).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }), "{} returned {:?}", algorithm, err);
    }
}

#[test]
fn test_non_finite_weight_is_rejected_by_every_algorithm() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let graph = build(vec![
            flight("A", "B", value, 1.0),
            flight("B", "C", 10.0, 1.0),
        ])
        .unwrap();
        // A default only covers missing keys, never a bad value
        let weights = WeightSelector::new("air_time").with_default(1.0);

        for algorithm in Algorithm::ALL {
            let err = algorithm.find_path(&graph, "A", "C", &weights).unwrap_err();
            assert!(
                matches!(err, Error::InvalidWeight { ref key, .. } if key == "air_time"),
                "{} with {} returned {:?}",
                algorithm,
                value,
                err
            );
        }
    }
}

#[test]
fn test_non_finite_csv_cells_are_invalid_weights() {
    let data = "\
origin,dest,air_time
JFK,BOS,inf
BOS,ORD,NaN
ORD,DEN,-inf
";
    let graph = build(read_flight_records(data.as_bytes(), &FlightCsvOptions::default()).unwrap()).unwrap();
    let weights = WeightSelector::new("air_time");

    for (from, to) in [("JFK", "BOS"), ("BOS", "ORD"), ("ORD", "DEN")] {
        for algorithm in Algorithm::ALL {
            let err = algorithm.find_path(&graph, from, to, &weights).unwrap_err();
            assert!(
                matches!(err, Error::InvalidWeight { .. }),
                "{} {} -> {} returned {:?}",
                algorithm,
                from,
                to,
                err
            );
        }
    }
}

#[test]
fn test_empty_path_result_has_no_endpoints() {
    let result = PathResult {
        path: Vec::new(),
        total_weight: 0.0,
    };

    assert_eq!(result.source(), None);
    assert_eq!(result.target(), None);
    assert_eq!(result.hops(), 0);
    assert!(result.edges(&create_test_network()).is_empty());

    let decoded: PathResult = serde_json::from_str(r#"{"path":[],"total_weight":3.5}"#).unwrap();
    assert_eq!(decoded.source(), None);
    assert_eq!(decoded.hops(), 0);
}

#[test]
fn test_astar_with_admissible_heuristic_matches_dijkstra() {
    // Grid of airports "R{row}C{col}" with edge costs of at least 1
    let size = 6;
    let mut records = Vec::new();
    for r in 0..size {
        for c in 0..size {
            let here = format!("R{}C{}", r, c);
            if c + 1 < size {
                let cost = 1.0 + ((r * 7 + c * 3) % 5) as f64;
                records.push(EdgeRecord::new(
                    here.clone(),
                    format!("R{}C{}", r, c + 1),
                    EdgeAttributes::new().with("cost", cost),
                ));
            }
            if r + 1 < size {
                let cost = 1.0 + ((r * 3 + c * 5) % 4) as f64;
                records.push(EdgeRecord::new(
                    here,
                    format!("R{}C{}", r + 1, c),
                    EdgeAttributes::new().with("cost", cost),
                ));
            }
        }
    }
    let graph = build(records).unwrap();
    let weights = WeightSelector::new("cost");

    let coordinates = |label: &str| -> (f64, f64) {
        let (row, col) = label.trim_start_matches('R').split_once('C').unwrap();
        (row.parse().unwrap(), col.parse().unwrap())
    };
    let manhattan = move |node: &str, target: &str| {
        let (r1, c1) = coordinates(node);
        let (r2, c2) = coordinates(target);
        (r1 - r2).abs() + (c1 - c2).abs()
    };
    let astar = AStar::with_heuristic(manhattan);

    for (source, target) in [("R0C0", "R5C5"), ("R5C0", "R0C5"), ("R2C3", "R4C1")] {
        let expected = Dijkstra::new().find_path(&graph, source, target, &weights).unwrap();
        let guided = astar.find_path(&graph, source, target, &weights).unwrap();
        let plain = AStar::new().find_path(&graph, source, target, &weights).unwrap();

        assert!((guided.total_weight - expected.total_weight).abs() < EPSILON);
        assert!((plain.total_weight - expected.total_weight).abs() < EPSILON);
        assert!((path_weight(&graph, &guided, "cost") - guided.total_weight).abs() < EPSILON);
    }
}

#[test]
fn test_floyd_warshall_table_is_symmetric_and_reusable() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");
    let table = FloydWarshall::new().all_pairs(&graph, &weights).unwrap();
    let parallel = FloydWarshall::new()
        .with_parallel_threshold(0)
        .all_pairs(&graph, &weights)
        .unwrap();

    assert_eq!(table.node_count(), graph.node_count());
    for u in 0..graph.node_count() {
        assert_eq!(table.distance(u, u), Some(0.0));
        for v in 0..graph.node_count() {
            assert_eq!(table.distance(u, v), table.distance(v, u));
            assert_eq!(table.distance(u, v), parallel.distance(u, v));
        }
    }

    let jfk = graph.node_id("JFK").unwrap();
    let sfo = graph.node_id("SFO").unwrap();
    let hnl = graph.node_id("HNL").unwrap();
    let path = table.path(jfk, sfo).unwrap().unwrap();
    let labels: Vec<&str> = path.iter().map(|&n| graph.label(n).unwrap()).collect();
    assert_eq!(labels, vec!["JFK", "ORD", "DEN", "SFO"]);
    assert_eq!(table.path(jfk, hnl).unwrap(), None);
}

#[test]
fn test_bidirectional_direct_neighbors() {
    let graph = create_test_network();
    let weights = WeightSelector::new("air_time");

    let result = BidirectionalDijkstra::new()
        .find_path(&graph, "HNL", "OGG", &weights)
        .unwrap();
    assert_eq!(result.path, vec!["HNL", "OGG"]);
    assert!((result.total_weight - 30.0).abs() < EPSILON);
}

#[test]
fn test_dijkstra_tree_reaches_only_the_component() {
    let graph = create_test_network();
    let jfk = graph.node_id("JFK").unwrap();
    let tree = Dijkstra::new()
        .shortest_path_tree(&graph, jfk, &WeightSelector::new("air_time"))
        .unwrap();

    let reachable = tree.distances.iter().filter(|d| d.is_some()).count();
    assert_eq!(reachable, 6);
    assert!(tree.path_to(graph.node_id("OGG").unwrap()).is_none());

    let path = tree.path_to(graph.node_id("DEN").unwrap()).unwrap().unwrap();
    // Verify path continuity
    for pair in path.windows(2) {
        assert!(graph.has_edge(pair[0], pair[1]), "Path should only use existing edges");
    }
}

#[test]
fn test_path_edges_follow_travel_order() {
    let graph = create_test_network();
    let result = RouteQuery::new(Algorithm::BidirectionalDijkstra, "SFO", "JFK", "air_time")
        .run(&graph)
        .unwrap();

    let edges = result.edges(&graph);
    assert_eq!(edges.len(), result.hops());
    assert_eq!(edges[0].from, "SFO");
    assert_eq!(edges[0].to, "DEN");
    assert_eq!(edges.last().unwrap().to, "JFK");
    assert_eq!(edges[0].attributes.number("distance"), Some(967.0));
}

#[test]
fn test_algorithm_names_parse() {
    assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
    assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
    assert_eq!("a_star".parse::<Algorithm>().unwrap(), Algorithm::AStar);
    assert_eq!("Floyd-Warshall".parse::<Algorithm>().unwrap(), Algorithm::FloydWarshall);
    assert_eq!(
        "bidirectional".parse::<Algorithm>().unwrap(),
        Algorithm::BidirectionalDijkstra
    );
    assert!("bellman-ford".parse::<Algorithm>().is_err());

    let parsed: Algorithm = serde_json::from_str("\"floyd_warshall\"").unwrap();
    assert_eq!(parsed, Algorithm::FloydWarshall);
    let parsed: Algorithm = serde_json::from_str("\"astar\"").unwrap();
    assert_eq!(parsed, Algorithm::AStar);
}

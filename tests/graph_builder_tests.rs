use flight_routes::graph::{
    build, read_flight_records, AttributeValue, EdgeAttributes, EdgeRecord, FlightCsvOptions, Graph,
    GraphBuilder,
};
use flight_routes::Error;

fn air_time(minutes: f64) -> EdgeAttributes {
    EdgeAttributes::new().with("air_time", minutes)
}

#[test]
fn test_duplicate_pair_last_record_wins() {
    let graph = build(vec![
        EdgeRecord::new("A", "B", air_time(100.0)),
        EdgeRecord::new("A", "B", air_time(50.0)),
    ])
    .unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_between("A", "B").unwrap().number("air_time"), Some(50.0));
}

#[test]
fn test_reversed_pair_overwrites_whole_attribute_set() {
    let mut builder = GraphBuilder::new();
    builder
        .add_record(EdgeRecord::new(
            "JFK",
            "BOS",
            EdgeAttributes::new().with("air_time", 40.0).with("distance", 187.0),
        ))
        .unwrap();
    builder
        .add_record(EdgeRecord::new("bos", "jfk", EdgeAttributes::new().with("air_time", 45.0)))
        .unwrap();
    assert_eq!(builder.overwrites(), 1);

    let graph = builder.build();
    let edge = graph.edge_between("JFK", "BOS").unwrap();
    assert_eq!(edge.number("air_time"), Some(45.0));
    // Replaced, not merged
    assert_eq!(edge.get("distance"), None);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_overwrite_depends_on_input_order() {
    let first = build(vec![
        EdgeRecord::new("A", "B", air_time(50.0)),
        EdgeRecord::new("B", "A", air_time(100.0)),
    ])
    .unwrap();
    assert_eq!(first.edge_between("A", "B").unwrap().number("air_time"), Some(100.0));
}

#[test]
fn test_node_ids_are_normalized() {
    let graph = build(vec![EdgeRecord::new(" jfk ", "Lax", air_time(330.0))]).unwrap();

    let labels: Vec<&str> = graph.labels().collect();
    assert_eq!(labels, vec!["JFK", "LAX"]);
    assert_eq!(graph.node_id("jfk"), graph.node_id("JFK"));
    assert!(graph.node_id("  lax").is_some());
    assert!(graph.node_id("SFO").is_none());
}

#[test]
fn test_empty_identifiers_are_rejected() {
    let err = build(vec![
        EdgeRecord::new("A", "B", air_time(1.0)),
        EdgeRecord::new("", "B", air_time(1.0)),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { index: 1, .. }));

    let err = build(vec![EdgeRecord::new("A", "   ", air_time(1.0))]).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { index: 0, .. }));
}

#[test]
fn test_self_loop_is_a_single_adjacency_entry() {
    let graph = build(vec![
        EdgeRecord::new("A", "A", air_time(5.0)),
        EdgeRecord::new("A", "B", air_time(1.0)),
    ])
    .unwrap();

    let a = graph.node_id("A").unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.neighbors(a).count(), 2);
    assert!(graph.has_edge(a, a));
}

#[test]
fn test_edge_records_deserialize_from_json() {
    let record: EdgeRecord = serde_json::from_str(
        r#"{"origin": "EWR", "dest": "ORD", "attributes": {"air_time": 120, "name": "United"}}"#,
    )
    .unwrap();

    assert_eq!(record.attributes.number("air_time"), Some(120.0));
    assert_eq!(
        record.attributes.get("name"),
        Some(&AttributeValue::Text("United".to_string()))
    );
}

#[test]
fn test_read_flight_records_from_csv() {
    let data = "\
year,origin,dest,distance,air_time,name
2013,EWR,IAH,1400,227,United Air Lines Inc.
2013,LGA,IAH,1416,,United Air Lines Inc.
2013,JFK,MIA,1089,160,American Airlines Inc.
";
    let records = read_flight_records(data.as_bytes(), &FlightCsvOptions::default()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].origin, "EWR");
    assert_eq!(records[0].dest, "IAH");
    assert_eq!(records[0].attributes.number("distance"), Some(1400.0));
    assert_eq!(records[0].attributes.number("air_time"), Some(227.0));
    assert_eq!(
        records[0].attributes.get("name").and_then(AttributeValue::as_text),
        Some("United Air Lines Inc.")
    );
    // Empty cells are left out, unselected columns are ignored
    assert_eq!(records[1].attributes.get("air_time"), None);
    assert_eq!(records[1].attributes.get("year"), None);

    let graph = build(records).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_csv_without_dest_column_is_malformed() {
    let data = "origin,arrival,air_time\nJFK,LAX,330\n";
    let err = read_flight_records(data.as_bytes(), &FlightCsvOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }));
}

#[test]
fn test_csv_custom_columns_and_delimiter() {
    let data = "origin;dest;duration\nSEA;PDX;35\n";
    let options = FlightCsvOptions::default()
        .with_attribute_columns(["duration"])
        .with_delimiter(b';');
    let records = read_flight_records(data.as_bytes(), &options).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attributes.number("duration"), Some(35.0));
    assert_eq!(records[0].attributes.len(), 1);
}

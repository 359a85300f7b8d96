pub mod attributes;
pub mod builder;
pub mod loader;
pub mod traits;
pub mod undirected;

pub use attributes::{AttributeValue, EdgeAttributes};
pub use builder::{build, EdgeRecord, GraphBuilder};
pub use loader::{load_flights_csv, read_flight_records, FlightCsvOptions};
pub use traits::{Graph, NodeId};
pub use undirected::{normalize_node, Edge, UndirectedGraph};

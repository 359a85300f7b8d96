use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::graph::attributes::EdgeAttributes;
use crate::graph::traits::Graph;
use crate::graph::undirected::{normalize_node, UndirectedGraph};
use crate::{Error, Result};

/// One flight segment (or any other edge) as delivered by an ingestion source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub origin: String,
    pub dest: String,
    #[serde(default)]
    pub attributes: EdgeAttributes,
}

impl EdgeRecord {
    pub fn new(origin: impl Into<String>, dest: impl Into<String>, attributes: EdgeAttributes) -> Self {
        EdgeRecord {
            origin: origin.into(),
            dest: dest.into(),
            attributes,
        }
    }
}

/// Incrementally turns edge records into an [`UndirectedGraph`].
///
/// Records for an unordered pair that was already seen replace the previous
/// attribute set as a whole (last write wins), so the result depends on input order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: UndirectedGraph,
    records_seen: usize,
    overwrites: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Number of records for pairs that already had an attribute set
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// Adds a single record to the graph under construction
    pub fn add_record(&mut self, record: EdgeRecord) -> Result<()> {
        let index = self.records_seen;
        self.records_seen += 1;

        let origin = normalize_node(&record.origin);
        if origin.is_empty() {
            return Err(Error::MalformedRecord {
                index,
                reason: "empty origin".to_string(),
            });
        }
        let dest = normalize_node(&record.dest);
        if dest.is_empty() {
            return Err(Error::MalformedRecord {
                index,
                reason: "empty dest".to_string(),
            });
        }

        let a = self.graph.intern_node(origin);
        let b = self.graph.intern_node(dest);
        if self.graph.set_edge(a, b, record.attributes) {
            self.overwrites += 1;
            debug!(
                "Record #{} replaced attributes of edge {}-{}",
                index,
                self.graph.display_label(a),
                self.graph.display_label(b)
            );
        }
        Ok(())
    }

    /// Adds every record of a stream, stopping at the first malformed one
    pub fn extend<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Finishes construction; the returned graph is immutable
    pub fn build(self) -> UndirectedGraph {
        info!(
            "Built graph with {} nodes and {} edges from {} records ({} overwritten)",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.records_seen,
            self.overwrites
        );
        self.graph
    }
}

/// Builds a graph from a finite stream of edge records
pub fn build<I>(records: I) -> Result<UndirectedGraph>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    let mut builder = GraphBuilder::new();
    builder.extend(records)?;
    Ok(builder.build())
}

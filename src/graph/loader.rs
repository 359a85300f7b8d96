use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::graph::attributes::{AttributeValue, EdgeAttributes};
use crate::graph::builder::EdgeRecord;
use crate::{Error, Result};

/// Column selection for flight CSV files
#[derive(Debug, Clone)]
pub struct FlightCsvOptions {
    pub origin_column: String,
    pub dest_column: String,
    /// Columns copied into each edge's attributes
    pub attribute_columns: Vec<String>,
    pub delimiter: u8,
}

impl Default for FlightCsvOptions {
    fn default() -> Self {
        Self {
            origin_column: "origin".to_string(),
            dest_column: "dest".to_string(),
            attribute_columns: vec![
                "distance".to_string(),
                "air_time".to_string(),
                "name".to_string(),
            ],
            delimiter: b',',
        }
    }
}

impl FlightCsvOptions {
    /// Replace the attribute columns to keep
    pub fn with_attribute_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == name)
}

/// Reads edge records from CSV data with a header row.
///
/// Attribute columns missing from the header are ignored; empty cells are left out
/// of the attribute set.
pub fn read_flight_records<R: Read>(reader: R, options: &FlightCsvOptions) -> Result<Vec<EdgeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let origin_idx = column_index(&headers, &options.origin_column).ok_or_else(|| Error::MalformedRecord {
        index: 0,
        reason: format!("missing '{}' column", options.origin_column),
    })?;
    let dest_idx = column_index(&headers, &options.dest_column).ok_or_else(|| Error::MalformedRecord {
        index: 0,
        reason: format!("missing '{}' column", options.dest_column),
    })?;
    let attribute_idx: Vec<(&str, usize)> = options
        .attribute_columns
        .iter()
        .filter_map(|name| column_index(&headers, name).map(|idx| (name.as_str(), idx)))
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut attributes = EdgeAttributes::new();
        for &(name, idx) in &attribute_idx {
            match row.get(idx).map(str::trim) {
                Some(cell) if !cell.is_empty() => attributes.insert(name, AttributeValue::parse(cell)),
                _ => {}
            }
        }
        records.push(EdgeRecord {
            origin: row.get(origin_idx).unwrap_or_default().to_string(),
            dest: row.get(dest_idx).unwrap_or_default().to_string(),
            attributes,
        });
    }

    Ok(records)
}

/// Loads edge records from a CSV file on disk
pub fn load_flights_csv<P: AsRef<Path>>(path: P, options: &FlightCsvOptions) -> Result<Vec<EdgeRecord>> {
    let file = File::open(path.as_ref())?;
    let records = read_flight_records(file, options)?;
    info!("Loaded {} flight records from {}", records.len(), path.as_ref().display());
    Ok(records)
}

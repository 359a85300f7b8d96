use serde::{Deserialize, Serialize};

use crate::graph::{AttributeValue, EdgeAttributes, Graph, NodeId};
use crate::{Error, Result};

/// Selects the attribute that prices an edge for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSelector {
    key: String,
    /// Weight used for edges that lack the key entirely
    #[serde(default)]
    default: Option<f64>,
}

impl WeightSelector {
    /// Strict selector: every visited edge must carry a numeric `key`
    pub fn new(key: impl Into<String>) -> Self {
        WeightSelector {
            key: key.into(),
            default: None,
        }
    }

    /// Use `weight` for edges without the key instead of failing
    pub fn with_default(mut self, weight: f64) -> Self {
        self.default = Some(weight);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_weight(&self) -> Option<f64> {
        self.default
    }

    /// Reads the weight of the edge `from`-`to`.
    ///
    /// Fails with [`Error::InvalidWeight`] for missing, textual or non-finite values
    /// (`-inf` included) and with [`Error::NegativeWeight`] for finite negative ones.
    pub fn weight<G: Graph + ?Sized>(
        &self,
        graph: &G,
        from: NodeId,
        to: NodeId,
        attributes: &EdgeAttributes,
    ) -> Result<f64> {
        let weight = match attributes.get(&self.key) {
            Some(AttributeValue::Number(value)) => Some(*value),
            Some(AttributeValue::Text(_)) => None,
            None => self.default,
        };

        match weight {
            Some(w) if w.is_finite() && w >= 0.0 => Ok(w),
            Some(w) if w.is_finite() => Err(Error::NegativeWeight {
                key: self.key.clone(),
                from: graph.display_label(from),
                to: graph.display_label(to),
                weight: w,
            }),
            _ => Err(Error::InvalidWeight {
                key: self.key.clone(),
                from: graph.display_label(from),
                to: graph.display_label(to),
            }),
        }
    }
}

impl Default for WeightSelector {
    fn default() -> Self {
        WeightSelector::new("air_time")
    }
}

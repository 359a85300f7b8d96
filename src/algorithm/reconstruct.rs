use crate::graph::NodeId;
use crate::{Error, Result};

/// Turns a predecessor row into the path from `source` to `target`.
///
/// `pred_row[v]` is the node preceding `v` on the shortest known path from `source`.
/// The walk is bounded by the row length, so cyclic or dangling rows fail with
/// [`Error::CorruptedPredecessor`] instead of hanging.
pub fn reconstruct(pred_row: &[Option<NodeId>], source: NodeId, target: NodeId) -> Result<Vec<NodeId>> {
    if source == target {
        return Ok(vec![source]);
    }

    let mut path = vec![target];
    let mut current = target;

    for _ in 0..pred_row.len() {
        let previous = match pred_row.get(current) {
            Some(Some(previous)) => *previous,
            Some(None) => {
                return Err(Error::CorruptedPredecessor(format!(
                    "no predecessor for node {} on the way from {} to {}",
                    current, target, source
                )))
            }
            None => {
                return Err(Error::CorruptedPredecessor(format!(
                    "node {} is outside the predecessor row of length {}",
                    current,
                    pred_row.len()
                )))
            }
        };

        path.push(previous);
        if previous == source {
            path.reverse();
            return Ok(path);
        }
        current = previous;
    }

    Err(Error::CorruptedPredecessor(format!(
        "chain from {} did not reach {} within {} steps",
        target,
        source,
        pred_row.len()
    )))
}

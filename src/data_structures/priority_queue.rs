use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority frontier for the shortest path searches.
///
/// Entries are keyed by a non-negative `f64` cost wrapped in `OrderedFloat`, so the
/// cheapest entry is popped first. Stale entries are not removed on decrease-key;
/// callers skip them when popped.
#[derive(Debug)]
pub struct Frontier<V>
where
    V: Copy + Eq + Debug + Ord,
{
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, V)>>,
}

impl<V> Frontier<V>
where
    V: Copy + Eq + Debug + Ord,
{
    /// Creates a new empty frontier
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    /// Creates a frontier seeded with a single entry
    pub fn with_start(vertex: V, cost: f64) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(vertex, cost);
        frontier
    }

    /// Pushes an entry with the given cost
    pub fn push(&mut self, vertex: V, cost: f64) {
        self.heap.push(Reverse((OrderedFloat(cost), vertex)));
    }

    /// Removes the cheapest entry
    pub fn pop(&mut self) -> Option<(V, f64)> {
        self.heap
            .pop()
            .map(|Reverse((cost, vertex))| (vertex, cost.into_inner()))
    }
}

impl<V> Default for Frontier<V>
where
    V: Copy + Eq + Debug + Ord,
{
    fn default() -> Self {
        Frontier::new()
    }
}

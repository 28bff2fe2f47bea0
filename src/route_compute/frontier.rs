use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq)]
struct QueueEntry<N> {
    node: N,
    cost: f64,
}

impl<N: Ord> Eq for QueueEntry<N> {}

// Reversed so the max-heap pops the lowest cost first, then the lowest node.
impl<N: Ord> Ord for QueueEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<N: Ord> PartialOrd for QueueEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of tentative distances keyed by `(cost, node)`.
///
/// Equal costs are broken by node order, which makes the pop sequence and
/// therefore the chosen path deterministic. Superseded entries stay in the
/// heap and are dropped lazily by the `is_stale` predicate of [`pop_min`].
///
/// [`pop_min`]: DistanceFrontier::pop_min
#[derive(Debug, Clone)]
pub struct DistanceFrontier<N> {
    heap: BinaryHeap<QueueEntry<N>>,
}

impl<N: Ord> Default for DistanceFrontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Ord> DistanceFrontier<N> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, node: N, cost: f64) {
        self.heap.push(QueueEntry { node, cost });
    }

    pub fn pop_min<F>(&mut self, mut is_stale: F) -> Option<(N, f64)>
    where
        F: FnMut(&N, f64) -> bool,
    {
        while let Some(entry) = self.heap.pop() {
            if is_stale(&entry.node, entry.cost) {
                continue;
            }
            return Some((entry.node, entry.cost));
        }
        None
    }
}

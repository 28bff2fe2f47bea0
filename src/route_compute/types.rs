use std::collections::{BTreeMap, BTreeSet};

use crate::model::{NodeId, WeightDimension};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub start: NodeId,
    pub end: NodeId,
    pub dimension: WeightDimension,
}

impl RouteQuery {
    pub fn new(
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
        dimension: WeightDimension,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            dimension,
        }
    }
}

/// Per-query relaxation state. Borrows node ids from the graph and is dropped
/// when the query returns.
#[derive(Debug, Clone, Default)]
pub struct SearchTree<'g> {
    pub dist: BTreeMap<&'g NodeId, f64>,
    pub predecessors: BTreeMap<&'g NodeId, &'g NodeId>,
    pub finalized: BTreeSet<&'g NodeId>,
}

impl<'g> SearchTree<'g> {
    /// Distance of a finalized node. Tentative distances are not results.
    pub fn settled_distance(&self, node: &NodeId) -> Option<f64> {
        if !self.finalized.contains(node) {
            return None;
        }
        self.dist.get(node).copied()
    }
}

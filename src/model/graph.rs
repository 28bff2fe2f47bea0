use std::collections::BTreeMap;

use tracing::debug;

use super::{NodeId, RoutePath, WeightDimension, WeightVector};
use crate::error::{Result, RouteError};
use crate::route_compute::ShortestPathEngine;

#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    pub neighbor: NodeId,
    pub weights: WeightVector,
}

/// Undirected multigraph of locations. Every edge is stored twice, once in
/// each endpoint's adjacency list, and parallel edges are kept as separate
/// alternatives.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    adjacency: BTreeMap<NodeId, Vec<Adjacency>>,
    edge_count: usize,
    // Sum of every stored edge per dimension; bounds any simple path sum.
    weight_totals: WeightVector,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `id` with an empty adjacency list if it is not present yet.
    pub fn add_node(&mut self, id: impl Into<NodeId>) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Inserts an undirected edge. Weights are validated before anything is
    /// touched, so a rejected edge leaves the store unchanged.
    ///
    /// Besides being finite and non-negative, an edge is rejected with
    /// [`RouteError::InvalidWeight`] if it would push the graph-wide sum of any
    /// dimension past `f64::MAX`. Path totals can then never overflow.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        destination: impl Into<NodeId>,
        weights: WeightVector,
    ) -> Result<()> {
        weights.validate()?;
        let totals = self.checked_totals(weights)?;

        let source = source.into();
        let destination = destination.into();
        debug!(%source, %destination, ?weights, "add edge");

        self.adjacency
            .entry(source.clone())
            .or_default()
            .push(Adjacency {
                neighbor: destination.clone(),
                weights,
            });
        self.adjacency
            .entry(destination)
            .or_default()
            .push(Adjacency {
                neighbor: source,
                weights,
            });
        self.edge_count += 1;
        self.weight_totals = totals;
        Ok(())
    }

    fn checked_totals(&self, weights: WeightVector) -> Result<WeightVector> {
        let totals = WeightVector::new(
            self.weight_totals.distance + weights.distance,
            self.weight_totals.travel_time + weights.travel_time,
            self.weight_totals.cost + weights.cost,
        );
        for dimension in WeightDimension::ALL {
            if !totals.get(dimension).is_finite() {
                return Err(RouteError::InvalidWeight {
                    dimension,
                    value: weights.get(dimension),
                });
            }
        }
        Ok(totals)
    }

    pub fn add_route(
        &mut self,
        source: impl Into<NodeId>,
        destination: impl Into<NodeId>,
        distance: f64,
        travel_time: f64,
        cost: f64,
    ) -> Result<()> {
        self.add_edge(
            source,
            destination,
            WeightVector::new(distance, travel_time, cost),
        )
    }

    /// Adjacency of `node` in insertion order; empty for unknown nodes.
    pub fn neighbors(&self, node: &str) -> &[Adjacency] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Returns the stored identifier for `id`.
    pub fn node_id(&self, id: &str) -> Option<&NodeId> {
        self.adjacency.get_key_value(id).map(|(key, _)| key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn shortest_path(
        &self,
        start: &str,
        end: &str,
        dimension: WeightDimension,
    ) -> Result<RoutePath> {
        ShortestPathEngine::new(self).shortest_path(start, end, dimension)
    }
}

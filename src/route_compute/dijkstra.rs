use tracing::debug;

use super::{reconstruct_path, DistanceFrontier, RouteComputeEngine, RouteQuery, SearchTree};
use crate::error::{Result, RouteError};
use crate::model::{GraphStore, NodeId, RouteEntry, RoutePath, WeightDimension};

/// Single-source Dijkstra over a borrowed [`GraphStore`].
///
/// The engine never mutates the graph and keeps no state between queries, so
/// any number of engines may share one store across threads.
#[derive(Debug, Clone, Copy)]
pub struct ShortestPathEngine<'g> {
    graph: &'g GraphStore,
}

impl<'g> ShortestPathEngine<'g> {
    pub fn new(graph: &'g GraphStore) -> Self {
        Self { graph }
    }

    fn resolve(&self, id: &str) -> Result<&'g NodeId> {
        self.graph
            .node_id(id)
            .ok_or_else(|| RouteError::UnknownNode(NodeId::from(id)))
    }

    /// Cheapest route from `start` to `end` on `dimension`.
    ///
    /// Fails with [`RouteError::UnknownNode`] if either endpoint was never
    /// inserted and with [`RouteError::PathNotFound`] if both exist but are
    /// not connected.
    pub fn shortest_path(
        &self,
        start: &str,
        end: &str,
        dimension: WeightDimension,
    ) -> Result<RoutePath> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        debug!(%start, %end, %dimension, "shortest path query");

        if start == end {
            return Ok(RoutePath {
                dimension,
                nodes: vec![start.clone()],
                total_weight: 0.0,
            });
        }

        let tree = self.search(start, Some(end), dimension);
        let Some(total_weight) = tree.settled_distance(end) else {
            debug!(%start, %end, settled = tree.finalized.len(), "target unreachable");
            return Err(RouteError::PathNotFound {
                start: start.clone(),
                end: end.clone(),
            });
        };
        let nodes = reconstruct_path(&tree.predecessors, start, end)?;
        debug!(
            %start,
            %end,
            total_weight,
            hops = nodes.len() - 1,
            settled = tree.finalized.len(),
            "shortest path found"
        );

        Ok(RoutePath {
            dimension,
            nodes,
            total_weight,
        })
    }

    /// Every destination reachable from `start`, ordered by node id, with its
    /// cheapest route on `dimension`. Unreachable nodes are left out.
    pub fn route_table(&self, start: &str, dimension: WeightDimension) -> Result<Vec<RouteEntry>> {
        let start = self.resolve(start)?;
        let tree = self.search(start, None, dimension);

        let mut out = Vec::with_capacity(tree.finalized.len().saturating_sub(1));
        for destination in &tree.finalized {
            if *destination == start {
                continue;
            }
            let Some(total_weight) = tree.dist.get(destination).copied() else {
                continue;
            };
            let path = reconstruct_path(&tree.predecessors, start, destination)?;
            out.push(RouteEntry {
                destination: (*destination).clone(),
                total_weight,
                path,
            });
        }
        debug!(%start, %dimension, reachable = out.len(), "route table computed");
        Ok(out)
    }

    /// Relaxes outward from `start` until `target` is finalized or the
    /// frontier is exhausted.
    pub fn search(
        &self,
        start: &'g NodeId,
        target: Option<&NodeId>,
        dimension: WeightDimension,
    ) -> SearchTree<'g> {
        let mut tree = SearchTree::default();
        let mut frontier = DistanceFrontier::new();

        tree.dist.insert(start, 0.0);
        frontier.push(start, 0.0);

        loop {
            let Some((u, cost_u)) = frontier.pop_min(|node, cost| {
                if tree.finalized.contains(*node) {
                    return true;
                }
                match tree.dist.get(*node) {
                    Some(best) => cost.total_cmp(best).is_gt(),
                    None => true,
                }
            }) else {
                break;
            };
            tree.finalized.insert(u);

            if target == Some(u) {
                break;
            }

            for edge in self.graph.neighbors(u.as_str()) {
                let v = &edge.neighbor;
                if tree.finalized.contains(v) {
                    continue;
                }
                let candidate = cost_u + edge.weights.get(dimension);
                let best = tree.dist.get(v).copied().unwrap_or(f64::INFINITY);
                if candidate < best {
                    tree.dist.insert(v, candidate);
                    tree.predecessors.insert(v, u);
                    frontier.push(v, candidate);
                }
            }
        }

        tree
    }
}

impl RouteComputeEngine for ShortestPathEngine<'_> {
    type Input = RouteQuery;
    type Output = Result<RoutePath>;

    fn compute(&self, input: &Self::Input) -> Self::Output {
        self.shortest_path(input.start.as_str(), input.end.as_str(), input.dimension)
    }
}

use std::collections::BTreeMap;

use crate::error::{Result, RouteError};
use crate::model::NodeId;

/// Walks the predecessor chain back from `end` and returns the route in travel
/// order. The chain must terminate at `start`; anything else means `end` was
/// never reached and is reported as [`RouteError::PathNotFound`].
pub fn reconstruct_path(
    predecessors: &BTreeMap<&NodeId, &NodeId>,
    start: &NodeId,
    end: &NodeId,
) -> Result<Vec<NodeId>> {
    let mut reversed = vec![end.clone()];
    let mut current = end;
    // A well-formed chain visits each node at most once.
    let max_steps = predecessors.len() + 1;
    for _ in 0..max_steps {
        let Some(parent) = predecessors.get(current).copied() else {
            break;
        };
        reversed.push(parent.clone());
        current = parent;
    }

    if predecessors.contains_key(current) || current != start {
        return Err(RouteError::PathNotFound {
            start: start.clone(),
            end: end.clone(),
        });
    }

    reversed.reverse();
    Ok(reversed)
}

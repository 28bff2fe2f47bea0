use crate::model::{NodeId, WeightDimension};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("invalid {dimension} weight: {value} (must be finite and non-negative, and keep the graph total finite)")]
    InvalidWeight {
        dimension: WeightDimension,
        value: f64,
    },

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("no path found between {start} and {end}")]
    PathNotFound { start: NodeId, end: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weight dimension `{0}` (expected distance, travel_time or cost)")]
pub struct ParseDimensionError(pub String);

pub type Result<T> = std::result::Result<T, RouteError>;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{GraphStore, WeightDimension, WeightVector};

#[derive(Debug, Clone)]
pub struct TopologyConfig {
    pub default_weight: WeightDimension,
    pub graph: GraphStore,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    from: String,
    to: String,
    distance: f64,
    travel_time: f64,
    cost: f64,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    default_weight: Option<String>,
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

/// Reads a topology file. `.json` files are parsed as JSON, everything else
/// as YAML.
pub fn load_topology(path: &Path) -> Result<TopologyConfig> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("failed to read topology file {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw: RawTopology = if is_json {
        serde_json::from_str(&raw_text).context("failed to parse topology json")?
    } else {
        serde_yaml::from_str(&raw_text).context("failed to parse topology yaml")?
    };
    build_topology(raw)
}

fn build_topology(raw: RawTopology) -> Result<TopologyConfig> {
    let default_weight = match raw.default_weight {
        Some(name) => name
            .parse::<WeightDimension>()
            .context("invalid default_weight")?,
        None => WeightDimension::default(),
    };

    let mut graph = GraphStore::new();
    for node in raw.nodes {
        let node = node.trim();
        if !node.is_empty() {
            graph.add_node(node);
        }
    }

    for (idx, route) in raw.routes.into_iter().enumerate() {
        let weights = WeightVector::new(route.distance, route.travel_time, route.cost);
        graph
            .add_edge(route.from.trim(), route.to.trim(), weights)
            .with_context(|| format!("invalid route #{idx} ({} - {})", route.from, route.to))?;
    }

    Ok(TopologyConfig {
        default_weight,
        graph,
    })
}

/// Parses a `FROM,TO,DISTANCE,TRAVEL_TIME,COST` route spec.
pub fn parse_route_spec(spec: &str) -> Result<(String, String, WeightVector)> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [from, to, distance, travel_time, cost] = parts.as_slice() else {
        anyhow::bail!("expected FROM,TO,DISTANCE,TRAVEL_TIME,COST, got `{spec}`");
    };
    if from.is_empty() || to.is_empty() {
        anyhow::bail!("route endpoints must not be empty: `{spec}`");
    }
    let number = |field: &str, raw: &str| -> Result<f64> {
        raw.parse::<f64>()
            .with_context(|| format!("{field} must be numeric, got `{raw}`"))
    };

    Ok((
        from.to_string(),
        to.to_string(),
        WeightVector::new(
            number("distance", distance)?,
            number("travel_time", travel_time)?,
            number("cost", cost)?,
        ),
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
default_weight: cost
nodes: [Depot]
routes:
  - { from: A, to: B, distance: 10, travel_time: 2, cost: 5 }
  - { from: B, to: C, distance: 4, travel_time: 1, cost: 2 }
  - { from: A, to: C, distance: 20, travel_time: 10, cost: 1 }
"#;

    fn load_yaml(text: &str) -> Result<TopologyConfig> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        load_topology(file.path())
    }

    #[test]
    fn yaml_topology_builds_graph() {
        let cfg = load_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.default_weight, WeightDimension::Cost);
        assert_eq!(cfg.graph.node_count(), 4);
        assert_eq!(cfg.graph.edge_count(), 3);
        assert!(cfg.graph.neighbors("Depot").is_empty());

        let route = cfg
            .graph
            .shortest_path("A", "C", cfg.default_weight)
            .unwrap();
        assert_eq!(route.total_weight, 1.0);
    }

    #[test]
    fn missing_default_weight_falls_back_to_distance() {
        let cfg = load_yaml("routes: []").unwrap();
        assert_eq!(cfg.default_weight, WeightDimension::Distance);
        assert!(cfg.graph.is_empty());
    }

    #[test]
    fn negative_weight_fails_load() {
        let err = load_yaml(
            "routes:\n  - { from: A, to: B, distance: -1, travel_time: 1, cost: 1 }\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid route #0 (A - B)"));
        assert!(format!("{err:#}").contains("distance"));
    }

    #[test]
    fn json_file_is_detected_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"routes": [{{"from": "X", "to": "Y", "distance": 1, "travel_time": 2, "cost": 3}}]}}"#
        )
        .unwrap();

        let cfg = load_topology(file.path()).unwrap();
        assert!(cfg.graph.has_node("X"));
        assert!(cfg.graph.has_node("Y"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_topology(Path::new("/nonexistent/topology.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/topology.yaml"));
    }

    #[test]
    fn route_spec_parses_five_fields() {
        let (from, to, weights) = parse_route_spec("A, B, 10, 2.5, 5").unwrap();
        assert_eq!(from, "A");
        assert_eq!(to, "B");
        assert_eq!(weights, WeightVector::new(10.0, 2.5, 5.0));

        assert!(parse_route_spec("A,B,10,2").is_err());
        assert!(parse_route_spec("A,B,ten,2,5").is_err());
        assert!(parse_route_spec(",B,1,2,5").is_err());
    }
}

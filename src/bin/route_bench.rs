use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use serde_json::{json, Value};
use tracing::info;
use travel_router::runtime::config::load_topology;
use travel_router::runtime::logging::init_logging;
use travel_router::{GraphStore, RouteEntry, ShortestPathEngine, WeightDimension, WeightVector};

#[derive(Debug, Parser)]
#[command(name = "route_bench")]
#[command(about = "Benchmark shortest-path queries for each weight dimension")]
struct Args {
    #[arg(long, default_value_t = 100)]
    nodes: usize,
    #[arg(long, default_value_t = 0.08)]
    density: f64,
    #[arg(long, default_value_t = 3)]
    seeds: usize,
    #[arg(long, default_value_t = 1)]
    start_seed: u64,
    #[arg(long, default_value_t = 8)]
    iterations: usize,
    #[arg(long)]
    topology: Option<PathBuf>,
    #[arg(long)]
    output_json: Option<PathBuf>,
    #[arg(long, default_value = "WARN")]
    log_level: String,
}

#[derive(Debug, Clone)]
struct LcgRng {
    state: u64,
}

impl LcgRng {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        self.state
    }

    fn next_f64(&mut self) -> f64 {
        let raw = self.next_u64() >> 11;
        (raw as f64) / ((1_u64 << 53) as f64)
    }

    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

fn node_name(idx: usize) -> String {
    format!("n{idx:04}")
}

fn random_weights(rng: &mut LcgRng) -> WeightVector {
    let distance = rng.range_f64(1.0, 50.0);
    WeightVector::new(
        distance,
        distance * rng.range_f64(0.5, 2.0),
        rng.range_f64(0.0, 20.0),
    )
}

/// Ring plus random chords. Chords may duplicate ring edges, which exercises
/// parallel-edge handling.
fn generate_graph(seed: u64, nodes: usize, density: f64) -> anyhow::Result<GraphStore> {
    let mut rng = LcgRng::new(seed);
    let mut graph = GraphStore::new();

    for idx in 0..nodes {
        graph.add_node(node_name(idx));
    }
    if nodes >= 2 {
        for idx in 0..nodes {
            let next = (idx + 1) % nodes;
            graph.add_edge(node_name(idx), node_name(next), random_weights(&mut rng))?;
        }
    }

    let p = density.clamp(0.0, 1.0);
    for u in 0..nodes {
        for v in (u + 1)..nodes {
            if rng.next_f64() < p {
                graph.add_edge(node_name(u), node_name(v), random_weights(&mut rng))?;
            }
        }
    }
    Ok(graph)
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (q.clamp(0.0, 1.0) * (n - 1) as f64).round() as usize;
    sorted[rank]
}

fn summarize_entries(entries: &[RouteEntry], total_destinations: usize) -> Value {
    let mut weights: Vec<f64> = entries.iter().map(|entry| entry.total_weight).collect();
    weights.sort_by(|a, b| a.total_cmp(b));

    let mean_weight = if weights.is_empty() {
        f64::NAN
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    };
    let mean_hops = if entries.is_empty() {
        0.0
    } else {
        entries
            .iter()
            .map(|entry| entry.path.len().saturating_sub(1) as f64)
            .sum::<f64>()
            / entries.len() as f64
    };

    json!({
        "reachable": entries.len(),
        "total_destinations": total_destinations,
        "reachable_ratio": if total_destinations == 0 { 1.0 } else { entries.len() as f64 / total_destinations as f64 },
        "mean_weight": mean_weight,
        "p95_weight": percentile(&weights, 0.95),
        "mean_hops": mean_hops,
    })
}

fn bench_dimension(
    graph: &GraphStore,
    src: &str,
    dimension: WeightDimension,
    iterations: usize,
    total_destinations: usize,
) -> anyhow::Result<Value> {
    let engine = ShortestPathEngine::new(graph);
    let mut elapsed_ms = 0.0;
    let mut entries = Vec::new();

    for _ in 0..iterations.max(1) {
        let start = Instant::now();
        let current = engine.route_table(src, dimension)?;
        elapsed_ms += start.elapsed().as_secs_f64() * 1000.0;
        entries = current;
    }

    let mut out = summarize_entries(&entries, total_destinations);
    if let Some(map) = out.as_object_mut() {
        map.insert("weight".to_string(), json!(dimension));
        map.insert(
            "runtime_ms".to_string(),
            json!(elapsed_ms / iterations.max(1) as f64),
        );
    }
    Ok(out)
}

fn avg(rows: &[&Value], key: &str) -> f64 {
    let xs: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(key).and_then(Value::as_f64))
        .collect();
    if xs.is_empty() {
        f64::NAN
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

fn aggregate(seed_rows: &[Value]) -> Value {
    let mut buckets: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
    for row in seed_rows {
        if let Some(dims) = row.get("dimensions").and_then(Value::as_array) {
            for dim in dims {
                if let Some(name) = dim.get("weight").and_then(Value::as_str) {
                    buckets.entry(name.to_string()).or_default().push(dim);
                }
            }
        }
    }

    let out = buckets
        .into_iter()
        .map(|(name, rows)| {
            json!({
                "weight": name,
                "runtime_ms": avg(&rows, "runtime_ms"),
                "reachable_ratio": avg(&rows, "reachable_ratio"),
                "mean_weight": avg(&rows, "mean_weight"),
                "p95_weight": avg(&rows, "p95_weight"),
                "mean_hops": avg(&rows, "mean_hops"),
            })
        })
        .collect();
    Value::Array(out)
}

fn print_summary(aggregated: &Value) {
    println!("weight\truntime_ms\treachable_ratio\tmean_weight\tp95_weight\tmean_hops");
    let Some(rows) = aggregated.as_array() else {
        return;
    };
    for row in rows {
        let field = |key: &str| row.get(key).and_then(Value::as_f64).unwrap_or(f64::NAN);
        let name = row.get("weight").and_then(Value::as_str).unwrap_or("?");
        println!(
            "{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
            name,
            field("runtime_ms"),
            field("reachable_ratio"),
            field("mean_weight"),
            field("p95_weight"),
            field("mean_hops"),
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;
    let mut seed_rows = Vec::new();

    for idx in 0..args.seeds.max(1) {
        let seed = args.start_seed + idx as u64;
        let graph = match args.topology.as_ref() {
            Some(path) => load_topology(path)?.graph,
            None => generate_graph(seed, args.nodes.max(2), args.density)?,
        };

        let Some(src) = graph.nodes().next().cloned() else {
            anyhow::bail!("topology has no nodes");
        };
        let total_destinations = graph.node_count() - 1;
        info!(
            seed,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "benchmark graph ready"
        );

        let dimensions = WeightDimension::ALL
            .into_iter()
            .map(|dimension| {
                bench_dimension(
                    &graph,
                    src.as_str(),
                    dimension,
                    args.iterations,
                    total_destinations,
                )
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        seed_rows.push(json!({
            "seed": seed,
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "source": src,
            "dimensions": dimensions,
        }));
    }

    let aggregated = aggregate(&seed_rows);
    print_summary(&aggregated);

    let payload = json!({
        "config": {
            "nodes": args.nodes,
            "density": args.density,
            "seeds": args.seeds,
            "start_seed": args.start_seed,
            "iterations": args.iterations,
            "topology": args.topology,
        },
        "runs": seed_rows,
        "aggregate": aggregated,
    });

    if let Some(path) = args.output_json {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(&payload)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_graph_is_connected_through_the_ring() {
        let graph = generate_graph(7, 25, 0.0).unwrap();
        assert_eq!(graph.node_count(), 25);
        assert_eq!(graph.edge_count(), 25);

        for dimension in WeightDimension::ALL {
            let table = ShortestPathEngine::new(&graph)
                .route_table(&node_name(0), dimension)
                .unwrap();
            assert_eq!(table.len(), 24);
        }
    }

    #[test]
    fn same_seed_builds_same_graph() {
        let first = generate_graph(42, 30, 0.2).unwrap();
        let second = generate_graph(42, 30, 0.2).unwrap();
        assert_eq!(first.edge_count(), second.edge_count());
        assert!(first.nodes().eq(second.nodes()));
        for node in first.nodes() {
            assert_eq!(first.neighbors(node.as_str()), second.neighbors(node.as_str()));
        }

        let other = generate_graph(43, 30, 0.2).unwrap();
        assert!(first
            .nodes()
            .any(|node| first.neighbors(node.as_str()) != other.neighbors(node.as_str())));
    }

    #[test]
    fn percentile_picks_nearest_rank() {
        assert!(percentile(&[], 0.95).is_nan());
        assert_eq!(percentile(&[3.0], 0.95), 3.0);

        let sorted: Vec<f64> = (1..=21).map(f64::from).collect();
        assert_eq!(percentile(&sorted, 0.95), 20.0);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 1.5), 21.0);
    }

    #[test]
    fn summary_reports_reachability_and_hops() {
        let graph = generate_graph(3, 10, 0.0).unwrap();
        let summary = bench_dimension(&graph, &node_name(0), WeightDimension::Cost, 2, 9).unwrap();
        assert_eq!(summary["reachable"], json!(9));
        assert_eq!(summary["reachable_ratio"], json!(1.0));
        assert_eq!(summary["weight"], json!("cost"));
        assert!(summary["mean_hops"].as_f64().unwrap() >= 1.0);
    }
}

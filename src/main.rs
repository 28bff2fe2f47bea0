use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use travel_router::runtime::config::{load_topology, parse_route_spec};
use travel_router::runtime::logging::init_logging;
use travel_router::{
    GraphStore, RouteComputeEngine, RouteEntry, RouteError, RoutePath, RouteQuery,
    ShortestPathEngine, WeightDimension,
};

#[derive(Debug, Parser)]
#[command(name = "routeplan")]
#[command(about = "Find the cheapest travel route by distance, travel time or cost")]
struct Args {
    /// YAML or JSON topology file.
    #[arg(long)]
    topology: Option<PathBuf>,
    /// Extra route as FROM,TO,DISTANCE,TRAVEL_TIME,COST. May be repeated.
    #[arg(long = "route", value_name = "SPEC")]
    routes: Vec<String>,
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: Option<String>,
    /// distance, travel_time or cost. Defaults to the topology's default_weight.
    #[arg(long)]
    weight: Option<WeightDimension>,
    /// Print every reachable destination from --from.
    #[arg(long)]
    all: bool,
    #[arg(long)]
    json: bool,
    #[arg(long, default_value = "INFO")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args.log_level) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_failure(&err));
            ExitCode::FAILURE
        }
    }
}

/// Builds the graph, answers the query and returns the text to print.
fn run(args: &Args) -> Result<String> {
    let (mut graph, default_weight) = match args.topology.as_ref() {
        Some(path) => {
            let cfg = load_topology(path)?;
            info!(
                path = %path.display(),
                nodes = cfg.graph.node_count(),
                edges = cfg.graph.edge_count(),
                "topology loaded"
            );
            (cfg.graph, cfg.default_weight)
        }
        None => (GraphStore::new(), WeightDimension::default()),
    };

    let mut output = String::new();
    for spec in &args.routes {
        let (from, to, weights) = parse_route_spec(spec)?;
        graph
            .add_edge(from.as_str(), to.as_str(), weights)
            .with_context(|| format!("rejected route `{spec}`"))?;
        writeln!(output, "Route added between {from} and {to}.")?;
    }

    if graph.is_empty() {
        warn!("graph is empty; pass --topology or --route");
    }

    let dimension = args.weight.unwrap_or(default_weight);
    let engine = ShortestPathEngine::new(&graph);

    if args.all {
        let table = engine.route_table(&args.from, dimension)?;
        if args.json {
            let payload = json!({
                "start": args.from,
                "weight": dimension,
                "routes": table,
            });
            writeln!(output, "{}", serde_json::to_string_pretty(&payload)?)?;
        } else {
            output.push_str(&render_table(dimension, &table));
        }
        return Ok(output);
    }

    let Some(to) = args.to.as_deref() else {
        anyhow::bail!("--to is required unless --all is given");
    };
    let route = engine.compute(&RouteQuery::new(args.from.as_str(), to, dimension))?;
    if args.json {
        writeln!(output, "{}", serde_json::to_string_pretty(&route)?)?;
    } else {
        output.push_str(&render_route(&route));
    }
    Ok(output)
}

fn render_route(route: &RoutePath) -> String {
    format!(
        "Path: {}\nTotal {}: {:.2}\nHops: {}\n",
        route.display_nodes(),
        route.dimension,
        route.total_weight,
        route.hops()
    )
}

fn render_table(dimension: WeightDimension, table: &[RouteEntry]) -> String {
    let mut out = format!("destination\ttotal_{dimension}\tpath\n");
    for entry in table {
        let path: Vec<&str> = entry.path.iter().map(|node| node.as_str()).collect();
        out.push_str(&format!(
            "{}\t{:.2}\t{}\n",
            entry.destination,
            entry.total_weight,
            path.join(" -> ")
        ));
    }
    out
}

/// User-facing message for a failed run. Engine errors are recognised through
/// any context added on the way up.
fn render_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RouteError>() {
        Some(RouteError::PathNotFound { start, end }) => {
            format!("No path found between {start} and {end}.")
        }
        Some(RouteError::UnknownNode(node)) => format!("Unknown location: {node}"),
        Some(RouteError::InvalidWeight { dimension, value }) => format!(
            "Invalid {dimension}: {value}. Distance, travel time and cost must be non-negative numbers."
        ),
        None => format!("error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "routeplan",
            "--route",
            "A,B,10,2,5",
            "--route",
            "B,C,4,1,2",
            "--route",
            "A,C,20,10,1",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn prints_path_total_and_hops() {
        let output = run(&parse(&["--from", "A", "--to", "C", "--weight", "distance"])).unwrap();
        assert!(output.starts_with("Route added between A and B.\n"));
        assert!(output.ends_with("Path: A -> B -> C\nTotal distance: 14.00\nHops: 2\n"));

        let output = run(&parse(&["--from", "A", "--to", "C", "--weight", "cost"])).unwrap();
        assert!(output.ends_with("Path: A -> C\nTotal cost: 1.00\nHops: 1\n"));
    }

    #[test]
    fn weight_defaults_to_distance_without_topology() {
        let output = run(&parse(&["--from", "C", "--to", "A"])).unwrap();
        assert!(output.ends_with("Path: C -> B -> A\nTotal distance: 14.00\nHops: 2\n"));
    }

    #[test]
    fn route_table_lists_each_destination() {
        let output = run(&parse(&["--from", "A", "--all", "--weight", "travel_time"])).unwrap();
        assert!(output.ends_with(
            "destination\ttotal_travel_time\tpath\nB\t2.00\tA -> B\nC\t3.00\tA -> B -> C\n"
        ));
    }

    #[test]
    fn unreachable_target_is_reported_by_name() {
        let args = Args::try_parse_from([
            "routeplan", "--route", "A,B,1,1,1", "--route", "C,D,1,1,1", "--from", "A", "--to",
            "D",
        ])
        .unwrap();
        let err = run(&args).unwrap_err();
        assert_eq!(render_failure(&err), "No path found between A and D.");
    }

    #[test]
    fn unknown_location_is_reported_by_name() {
        let err = run(&parse(&["--from", "A", "--to", "Z"])).unwrap_err();
        assert_eq!(render_failure(&err), "Unknown location: Z");
    }

    #[test]
    fn rejected_route_is_recognised_through_context() {
        let args = Args::try_parse_from([
            "routeplan", "--route", "A,B,-1,1,1", "--from", "A", "--to", "B",
        ])
        .unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("rejected route `A,B,-1,1,1`"));
        assert_eq!(
            render_failure(&err),
            "Invalid distance: -1. Distance, travel time and cost must be non-negative numbers."
        );
    }

    #[test]
    fn other_failures_fall_back_to_error_chain() {
        let err = run(&parse(&["--from", "A"])).unwrap_err();
        assert_eq!(
            render_failure(&err),
            "error: --to is required unless --all is given"
        );

        let args =
            Args::try_parse_from(["routeplan", "--route", "A,B,x,1,1", "--from", "A"]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(render_failure(&err).starts_with("error: distance must be numeric"));
    }

    #[test]
    fn json_output_carries_nodes_and_total() {
        let output = run(&parse(&["--from", "A", "--to", "C", "--weight", "cost", "--json"])).unwrap();
        let json_start = output.find('{').unwrap();
        let value: serde_json::Value = serde_json::from_str(&output[json_start..]).unwrap();
        assert_eq!(value["nodes"], json!(["A", "C"]));
        assert_eq!(value["total_weight"], json!(1.0));
        assert_eq!(value["dimension"], json!("cost"));
    }
}

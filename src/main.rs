use std::io::Read;

use clap::Parser;

use topo::Topology;
use topo::broker::{BrokerSnapshot, snapshot_to_topology};
use topo::document::import_topology_json;
use topo::format::format_number;
use topo::query::node_by_id;
use topo::validate::is_valid_connection;

#[derive(Parser)]
#[command(
    name = "topo",
    about = "Inspect message-broker topology documents as ASCII"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Input is a raw management-API snapshot instead of a topology document
    #[arg(long)]
    snapshot: bool,

    /// Print summary statistics instead of the graph
    #[arg(long)]
    stats: bool,

    /// Report dangling or illegal bindings, exit non-zero if any
    #[arg(long)]
    check: bool,

    /// Re-run auto-layout and print the exported document JSON
    #[arg(long)]
    layout: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let mut topo = load(&input, cli.snapshot).unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });

    if cli.stats {
        print_stats(&topo);
    } else if cli.check {
        if !check_bindings(&topo) {
            std::process::exit(1);
        }
    } else if cli.layout {
        topo.auto_layout();
        match serde_json::to_string_pretty(&topo.export()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", topo::renderer::render(&topo.nodes, &topo.edges));
    }
}

fn load(input: &str, snapshot: bool) -> topo::Result<Topology> {
    if snapshot {
        let snapshot: BrokerSnapshot = serde_json::from_str(input)?;
        snapshot_to_topology(&snapshot)
    } else {
        let (nodes, edges) = import_topology_json(input)?;
        Ok(Topology { nodes, edges })
    }
}

fn print_stats(topo: &Topology) {
    let stats = topo.stats();
    println!("producers:      {}", stats.producers);
    println!("exchanges:      {}", stats.exchanges);
    println!("queues:         {}", stats.queues);
    println!("consumers:      {}", stats.consumers);
    println!("bindings:       {}", stats.bindings);
    println!("total messages: {}", format_number(stats.total_messages as f64));
    println!("active nodes:   {}", stats.active_nodes);
}

/// Prints every dangling or illegal binding; true when the graph is clean.
fn check_bindings(topo: &Topology) -> bool {
    let mut clean = true;
    for edge in &topo.edges {
        let source = node_by_id(&topo.nodes, &edge.source);
        let target = node_by_id(&topo.nodes, &edge.target);
        match (source, target) {
            (Some(source), Some(target)) => {
                if !is_valid_connection(source, target) {
                    println!(
                        "illegal binding: {} ({}) ──> {} ({})",
                        source.label(),
                        source.kind(),
                        target.label(),
                        target.kind()
                    );
                    clean = false;
                }
            }
            _ => {
                println!("dangling binding: {} ──> {}", edge.source, edge.target);
                clean = false;
            }
        }
    }
    if clean {
        println!(
            "ok: {} nodes, {} bindings",
            topo.nodes.len(),
            topo.edges.len()
        );
    }
    clean
}

//! Standalone strategy benchmark: materialize-then-aggregate vs
//! push-down-aggregate over the same trip file, single run each.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use txd_common::DashboardConfig;
use txd_dashboard::bench::{run_benchmark, render_report, GroupMean};
use txd_dashboard::fixtures;
use txd_engine::Engine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args
        .first()
        .map(|a| a == "--help" || a == "-h")
        .unwrap_or(false)
    {
        print_usage();
        return Ok(());
    }

    let mut data_path = DashboardConfig::default().data_path;
    let mut json_path = None;
    let mut generate_rows = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                data_path = args.get(i).cloned().ok_or("missing value for --data")?;
            }
            "--json" => {
                i += 1;
                json_path = Some(args.get(i).cloned().ok_or("missing value for --json")?);
            }
            "--generate" => {
                i += 1;
                let raw = args.get(i).ok_or("missing value for --generate")?;
                generate_rows = Some(
                    raw.parse::<usize>()
                        .map_err(|e| format!("bad value for --generate: {e}"))?,
                );
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    if let Some(rows) = generate_rows {
        println!("Generating {rows} synthetic trips at {data_path}...");
        fixtures::generate_synthetic_trips(Path::new(&data_path), rows)?;
    }

    println!("--- STARTING BENCHMARK ---");
    let engine = Engine::open()?;
    let report = run_benchmark(&engine, &data_path)?;

    print_groups(&report.materialize.label, &report.materialize_groups);
    print_groups(&report.pushdown.label, &report.pushdown_groups);
    print!("{}", render_report(&report));

    if let Some(path) = json_path {
        let payload = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, payload)?;
        println!("Results exported to: {path}");
    }
    Ok(())
}

fn print_groups(label: &str, groups: &[GroupMean]) {
    println!("{label} result (first {} groups):", groups.len().min(5));
    for g in groups.iter().take(5) {
        println!("  passenger_count {}: avg_dist {:.4}", g.passenger_count, g.mean_distance);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  txd-bench [--data PATH] [--generate ROWS] [--json PATH]");
}

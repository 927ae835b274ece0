use tracing_subscriber::EnvFilter;
use txd_common::DashboardConfig;
use txd_dashboard::adhoc::{run_adhoc, AdhocOutcome};
use txd_dashboard::filter::RangeFilter;
use txd_dashboard::metrics::{distance_bounds, recompute};
use txd_dashboard::render::{render_metrics, render_table};
use txd_dashboard::repl;
use txd_engine::Engine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(|a| a.as_str()) {
        Some("query") => run_query(&args),
        Some("metrics") => run_metrics(&args),
        Some("repl") => {
            let config = parse_common_opts(&args)?;
            repl::run_repl(&config)
        }
        Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(format!("unknown subcommand: {other}").into())
        }
        None => {
            print_usage();
            Err("missing subcommand".into())
        }
    }
}

fn run_query(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut sql = None;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--sql" => {
                i += 1;
                sql = Some(args.get(i).cloned().ok_or("missing value for --sql")?);
            }
            // --data is accepted for symmetry; the query text itself decides
            // what it reads.
            "--data" => {
                i += 1;
                args.get(i).ok_or("missing value for --data")?;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }
    let sql = sql.ok_or("query requires --sql")?;

    let engine = Engine::open()?;
    match run_adhoc(&engine, &sql) {
        AdhocOutcome::Completed { table, elapsed } => {
            println!("{}", render_table(&table));
            println!("Query executed in {:.4} seconds", elapsed.as_secs_f64());
        }
        AdhocOutcome::Failed { message } => eprintln!("SQL error: {message}"),
    }
    Ok(())
}

fn run_metrics(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::default();
    let mut low = None;
    let mut high = None;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                config.data_path = args.get(i).cloned().ok_or("missing value for --data")?;
            }
            "--low" => {
                i += 1;
                low = Some(parse_f64(args.get(i), "--low")?);
            }
            "--high" => {
                i += 1;
                high = Some(parse_f64(args.get(i), "--high")?);
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    let engine = Engine::open()?;
    // Startup bounds are fatal here: no bounds, no default filter.
    let (min, max) = distance_bounds(&engine, &config.data_path)?;
    println!("trip_distance spans {min:.1}..{max:.1} miles");

    let filter = RangeFilter::new(
        low.unwrap_or(config.default_low),
        high.unwrap_or(config.default_high),
    )?;
    let metrics = recompute(&engine, &config.data_path, &filter)?;
    println!("Filter {filter}");
    print!("{}", render_metrics(&metrics));
    Ok(())
}

fn parse_common_opts(args: &[String]) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::default();
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                config.data_path = args.get(i).cloned().ok_or("missing value for --data")?;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }
    Ok(config)
}

fn parse_f64(value: Option<&String>, flag: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let raw = value.ok_or_else(|| format!("missing value for {flag}"))?;
    raw.parse::<f64>()
        .map_err(|e| format!("bad value for {flag}: {e}").into())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  txd query --sql \"<SQL>\"");
    eprintln!("  txd metrics [--low L] [--high H] [--data PATH]");
    eprintln!("  txd repl [--data PATH]");
}

use std::io::Write;

use txd_common::{DashboardConfig, Result, TxdError};
use txd_engine::Engine;

use crate::adhoc::{run_adhoc, AdhocOutcome};
use crate::filter::RangeFilter;
use crate::metrics::{distance_bounds, recompute};
use crate::render::{render_metrics, render_table};

pub fn run_repl(config: &DashboardConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;
    match distance_bounds(&engine, &config.data_path) {
        Ok((min, max)) => eprintln!("trip_distance spans {min:.1}..{max:.1} miles"),
        Err(e) => eprintln!("warning: {e}"),
    }

    eprintln!("txd REPL (SQL to run it, \\filter LOW HIGH for metrics, \\q to quit)");
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("txd> ");
        std::io::stdout().flush()?;
        line.clear();
        // Ctrl+D => EOF => exit
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if raw == "\\q" || raw.eq_ignore_ascii_case("quit") || raw.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Some(rest) = raw.strip_prefix("\\filter") {
            match parse_filter_args(rest) {
                Ok(filter) => match recompute(&engine, &config.data_path, &filter) {
                    Ok(metrics) => {
                        println!("Filter {filter}");
                        print!("{}", render_metrics(&metrics));
                    }
                    Err(e) => eprintln!("error: {e}"),
                },
                Err(e) => eprintln!("error: {e}"),
            }
            continue;
        }

        let sql = raw.trim_end_matches(';');
        match run_adhoc(&engine, sql) {
            AdhocOutcome::Completed { table, elapsed } => {
                println!("{}", render_table(&table));
                println!("Query executed in {:.4} seconds", elapsed.as_secs_f64());
            }
            AdhocOutcome::Failed { message } => eprintln!("SQL error: {message}"),
        }
    }
    Ok(())
}

fn parse_filter_args(rest: &str) -> Result<RangeFilter> {
    let parts = rest.split_whitespace().collect::<Vec<_>>();
    let [low, high] = parts.as_slice() else {
        return Err(TxdError::InvalidConfig(
            "usage: \\filter LOW HIGH".to_string(),
        ));
    };
    let low = low
        .parse::<f64>()
        .map_err(|e| TxdError::InvalidConfig(format!("bad LOW value: {e}")))?;
    let high = high
        .parse::<f64>()
        .map_err(|e| TxdError::InvalidConfig(format!("bad HIGH value: {e}")))?;
    RangeFilter::new(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_args_parse_into_a_validated_filter() {
        let filter = parse_filter_args(" 0.5 20").expect("valid args");
        assert_eq!(filter.low(), 0.5);
        assert_eq!(filter.high(), 20.0);
    }

    #[test]
    fn filter_args_reject_wrong_arity_and_bad_numbers() {
        assert!(parse_filter_args("").is_err());
        assert!(parse_filter_args("1").is_err());
        assert!(parse_filter_args("1 2 3").is_err());
        assert!(parse_filter_args("one two").is_err());
        assert!(parse_filter_args("30 5").is_err());
    }
}

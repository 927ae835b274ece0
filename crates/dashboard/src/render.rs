//! Plain-text rendering for the CLI surfaces.

use std::fmt::Write as _;

use txd_engine::Table;

use crate::metrics::DashboardMetrics;

/// Column-width aligned grid; mirrors what the query shell prints for any
/// ad-hoc result.
pub fn render_table(table: &Table) -> String {
    if table.num_rows() == 0 {
        return "OK: 0 rows".to_string();
    }

    let header = table.columns().to_vec();
    let body = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = header.iter().map(|h| h.len()).collect::<Vec<_>>();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    write_row(&mut out, &header, &widths);
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    let _ = writeln!(out, "{rule}");
    for row in &body {
        write_row(&mut out, row, &widths);
    }
    let _ = write!(out, "{} rows", body.len());
    out
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn render_metrics(metrics: &DashboardMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Trips: {}", metrics.summary.total_trips);
    let _ = writeln!(out, "Avg Fare: {}", money(metrics.summary.avg_fare));
    let _ = writeln!(
        out,
        "Avg Distance: {}",
        metrics
            .summary
            .avg_dist
            .map(|v| format!("{v:.1} miles"))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(out, "Avg Tip: {}", money(metrics.summary.avg_tip));
    let _ = writeln!(out, "Trips by hour:");
    if metrics.hourly.is_empty() {
        let _ = writeln!(out, "  (no trips in range)");
    }
    for bucket in &metrics.hourly {
        let _ = writeln!(out, "  {:>2}: {}", bucket.hour, bucket.trips);
    }
    let _ = writeln!(out, "Scatter sample: {} points", metrics.sample.len());
    out
}

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

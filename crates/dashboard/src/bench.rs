//! Two-strategy benchmark over the same logical aggregate:
//! mean `trip_distance` grouped by `passenger_count`.
//!
//! Strategy A materializes the whole file into memory and groups there;
//! strategy B pushes the aggregation down to the engine so only the grouped
//! result crosses into memory. Both are measured single-shot, no warm-up
//! and no repetition, which is the contract of this comparison.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, Float64Array, Int64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Serialize;
use tracing::info;
use txd_common::{Result, TxdError};
use txd_engine::Engine;

use crate::queries;

pub const MATERIALIZE_LABEL: &str = "Materialize";
pub const PUSHDOWN_LABEL: &str = "Pushdown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupMean {
    pub passenger_count: i64,
    pub mean_distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub label: String,
    pub seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub materialize: Measurement,
    pub pushdown: Measurement,
    /// Materialize elapsed divided by push-down elapsed.
    pub ratio: f64,
    pub materialize_groups: Vec<GroupMean>,
    pub pushdown_groups: Vec<GroupMean>,
}

/// Strategy A: read every row group of the file into memory, then compute
/// the grouped means with a plain hash of running sums.
///
/// Rows with a NULL group key or NULL distance are skipped, matching the
/// engine's AVG/GROUP BY semantics so the two strategies stay comparable.
pub fn materialize_then_aggregate(path: &Path) -> Result<Vec<GroupMean>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| TxdError::DataSource(format!("parquet open failed: {e}")))?
        .build()
        .map_err(|e| TxdError::DataSource(format!("parquet reader build failed: {e}")))?;

    let mut acc: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| TxdError::DataSource(format!("parquet read failed: {e}")))?;
        let keys = batch.column_by_name("passenger_count").ok_or_else(|| {
            TxdError::Execution("source is missing column passenger_count".to_string())
        })?;
        let dists = batch.column_by_name("trip_distance").ok_or_else(|| {
            TxdError::Execution("source is missing column trip_distance".to_string())
        })?;
        let keys = cast(keys, &DataType::Int64)
            .map_err(|e| TxdError::Execution(format!("passenger_count not integral: {e}")))?;
        let dists = cast(dists, &DataType::Float64)
            .map_err(|e| TxdError::Execution(format!("trip_distance not numeric: {e}")))?;
        let keys = keys
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| TxdError::Execution("passenger_count cast mismatch".to_string()))?;
        let dists = dists
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| TxdError::Execution("trip_distance cast mismatch".to_string()))?;

        for row in 0..batch.num_rows() {
            if keys.is_null(row) || dists.is_null(row) {
                continue;
            }
            let entry = acc.entry(keys.value(row)).or_insert((0.0, 0));
            entry.0 += dists.value(row);
            entry.1 += 1;
        }
    }

    Ok(acc
        .into_iter()
        .map(|(passenger_count, (sum, count))| GroupMean {
            passenger_count,
            mean_distance: sum / count as f64,
        })
        .collect())
}

/// Strategy B: one grouped-aggregation submission; only the grouped result
/// is materialized on this side.
pub fn pushdown_aggregate(engine: &Engine, path: &str) -> Result<Vec<GroupMean>> {
    let table = engine.submit(&queries::pushdown_sql(path))?;
    let mut groups = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let (Some(passenger_count), Some(mean_distance)) = (
            table.i64_at(row, "passenger_count"),
            table.f64_at(row, "avg_dist"),
        ) else {
            continue;
        };
        groups.push(GroupMean {
            passenger_count,
            mean_distance,
        });
    }
    Ok(groups)
}

/// Run both strategies once against the same source and time each from data
/// access through computation; reporting stays outside the timed windows.
pub fn run_benchmark(engine: &Engine, path: &str) -> Result<BenchReport> {
    info!(path, "running strategy benchmark");

    let start = Instant::now();
    let materialize_groups = materialize_then_aggregate(Path::new(path))?;
    let materialize_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let pushdown_groups = pushdown_aggregate(engine, path)?;
    let pushdown_secs = start.elapsed().as_secs_f64();

    Ok(BenchReport {
        materialize: Measurement {
            label: MATERIALIZE_LABEL.to_string(),
            seconds: materialize_secs,
        },
        pushdown: Measurement {
            label: PUSHDOWN_LABEL.to_string(),
            seconds: pushdown_secs,
        },
        ratio: materialize_secs / pushdown_secs,
        materialize_groups,
        pushdown_groups,
    })
}

/// Human-readable report: two labeled timing lines and the ratio statement.
pub fn render_report(report: &BenchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Time: {:.4} seconds",
        report.materialize.label, report.materialize.seconds
    );
    let _ = writeln!(
        out,
        "{} Time: {:.4} seconds",
        report.pushdown.label, report.pushdown.seconds
    );
    let _ = writeln!(
        out,
        "Push-down aggregation was {:.2}X faster",
        report.ratio
    );
    out
}

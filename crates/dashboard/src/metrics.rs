//! Filter-driven recomputation of the three aggregate results.
//!
//! A filter change triggers full recomputation: all three queries run from
//! scratch against the source, nothing is cached or updated incrementally.

use tracing::debug;
use txd_common::{Result, TxdError};
use txd_engine::Engine;

use crate::filter::RangeFilter;
use crate::queries;

/// Single-row KPI summary over the filtered trips.
///
/// Averages are `None` when the filtered set is empty (the engine returns
/// NULL for AVG over zero rows); `total_trips` is still 0 in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryKpis {
    pub total_trips: i64,
    pub avg_fare: Option<f64>,
    pub avg_dist: Option<f64>,
    pub avg_tip: Option<f64>,
}

/// One hour-of-day bucket. Hours with no matching trips are absent from the
/// histogram rather than zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyBucket {
    pub hour: i64,
    pub trips: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub trip_distance: f64,
    pub tip_amount: f64,
}

#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub summary: SummaryKpis,
    pub hourly: Vec<HourlyBucket>,
    pub sample: Vec<SamplePoint>,
}

/// MIN/MAX of `trip_distance`, computed once at startup to seed the slider.
///
/// Failure here is fatal to the metrics flow: a source that cannot produce
/// bounds gets no default filter.
pub fn distance_bounds(engine: &Engine, path: &str) -> Result<(f64, f64)> {
    let table = match engine.submit(&queries::bounds_sql(path)) {
        Ok(table) => table,
        Err(TxdError::Execution(msg)) => return Err(TxdError::DataSource(msg)),
        Err(e) => return Err(e),
    };
    match (table.f64_at(0, "min_dist"), table.f64_at(0, "max_dist")) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(TxdError::DataSource(format!(
            "no distance bounds in '{path}' (source empty?)"
        ))),
    }
}

/// Recompute all three aggregate results for the given filter.
pub fn recompute(engine: &Engine, path: &str, filter: &RangeFilter) -> Result<DashboardMetrics> {
    debug!(%filter, path, "recomputing dashboard metrics");
    Ok(DashboardMetrics {
        summary: summary_kpis(engine, path, filter)?,
        hourly: hourly_histogram(engine, path, filter)?,
        sample: scatter_sample(engine, path, filter)?,
    })
}

fn summary_kpis(engine: &Engine, path: &str, filter: &RangeFilter) -> Result<SummaryKpis> {
    let table = engine.submit(&queries::summary_sql(path, filter))?;
    let total_trips = table.i64_at(0, "total_trips").ok_or_else(|| {
        TxdError::Execution("summary query returned no total_trips".to_string())
    })?;
    Ok(SummaryKpis {
        total_trips,
        avg_fare: table.f64_at(0, "avg_fare"),
        avg_dist: table.f64_at(0, "avg_dist"),
        avg_tip: table.f64_at(0, "avg_tip"),
    })
}

fn hourly_histogram(
    engine: &Engine,
    path: &str,
    filter: &RangeFilter,
) -> Result<Vec<HourlyBucket>> {
    let table = engine.submit(&queries::hourly_sql(path, filter))?;
    let mut buckets = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let (Some(hour), Some(trips)) = (table.i64_at(row, "hour"), table.i64_at(row, "trip_count"))
        else {
            continue;
        };
        buckets.push(HourlyBucket { hour, trips });
    }
    Ok(buckets)
}

fn scatter_sample(engine: &Engine, path: &str, filter: &RangeFilter) -> Result<Vec<SamplePoint>> {
    let table = engine.submit(&queries::sample_sql(path, filter))?;
    let mut points = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let (Some(trip_distance), Some(tip_amount)) = (
            table.f64_at(row, "trip_distance"),
            table.f64_at(row, "tip_amount"),
        ) else {
            continue;
        };
        points.push(SamplePoint {
            trip_distance,
            tip_amount,
        });
    }
    Ok(points)
}

//! Deterministic trip parquet generation for tests and offline benchmark
//! runs. Values are index-derived, no RNG anywhere.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use txd_common::{Result, TxdError};

const MICROS_PER_SECOND: i64 = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct TripFixture {
    /// Hour of day of the pickup timestamp, 0..=23.
    pub pickup_hour: u32,
    pub trip_distance: f64,
    pub total_amount: f64,
    pub tip_amount: f64,
    pub passenger_count: i64,
}

pub fn trip_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(
            "tpep_pickup_datetime",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        Field::new("trip_distance", DataType::Float64, false),
        Field::new("total_amount", DataType::Float64, false),
        Field::new("tip_amount", DataType::Float64, false),
        Field::new("passenger_count", DataType::Int64, false),
    ]))
}

/// Write the given trips to a parquet file, one row each. Pickup timestamps
/// land on the requested hour of 1970-01-01 so EXTRACT(HOUR ...) round-trips
/// exactly.
pub fn write_trips(path: &Path, trips: &[TripFixture]) -> Result<()> {
    let schema = trip_schema();
    let pickups = trips
        .iter()
        .map(|t| (t.pickup_hour as i64 % 24) * 3_600 * MICROS_PER_SECOND)
        .collect::<Vec<_>>();
    let cols: Vec<ArrayRef> = vec![
        Arc::new(TimestampMicrosecondArray::from(pickups)),
        Arc::new(Float64Array::from(
            trips.iter().map(|t| t.trip_distance).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            trips.iter().map(|t| t.total_amount).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            trips.iter().map(|t| t.tip_amount).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            trips.iter().map(|t| t.passenger_count).collect::<Vec<_>>(),
        )),
    ];
    write_parquet(path, schema, cols)
}

/// Deterministic synthetic dataset covering all hours, a spread of
/// distances in [0, 30) miles, and passenger counts 1..=4.
pub fn generate_synthetic_trips(path: &Path, rows: usize) -> Result<()> {
    let trips = (0..rows)
        .map(|i| {
            let trip_distance = ((i % 300) as f64) / 10.0;
            let total_amount = 3.0 + trip_distance * 2.5;
            TripFixture {
                pickup_hour: (i % 24) as u32,
                trip_distance,
                total_amount,
                tip_amount: total_amount * 0.15,
                passenger_count: ((i % 4) + 1) as i64,
            }
        })
        .collect::<Vec<_>>();
    write_trips(path, &trips)
}

fn write_parquet(path: &Path, schema: Arc<Schema>, cols: Vec<ArrayRef>) -> Result<()> {
    let batch = RecordBatch::try_new(schema.clone(), cols)
        .map_err(|e| TxdError::Execution(format!("build batch failed: {e}")))?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)
        .map_err(|e| TxdError::Execution(format!("parquet writer create failed: {e}")))?;
    writer
        .write(&batch)
        .map_err(|e| TxdError::Execution(format!("parquet write failed: {e}")))?;
    writer
        .close()
        .map_err(|e| TxdError::Execution(format!("parquet close failed: {e}")))?;
    Ok(())
}

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use txd_common::TxdError;
use txd_dashboard::filter::RangeFilter;
use txd_dashboard::fixtures::{self, TripFixture};
use txd_dashboard::metrics::{distance_bounds, recompute, HourlyBucket};
use txd_engine::Engine;

fn temp_parquet(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "txd_metrics_{tag}_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir.join("trips.parquet")
}

fn trip(hour: u32, distance: f64) -> TripFixture {
    TripFixture {
        pickup_hour: hour,
        trip_distance: distance,
        total_amount: 10.0 + distance,
        tip_amount: 1.0 + distance / 10.0,
        passenger_count: 1,
    }
}

#[test]
fn summary_counts_rows_inside_the_closed_interval() {
    let path = temp_parquet("summary");
    let trips = [1.0, 5.0, 10.0, 15.0, 25.0]
        .into_iter()
        .enumerate()
        .map(|(i, d)| trip(i as u32, d))
        .collect::<Vec<_>>();
    fixtures::write_trips(&path, &trips).expect("write fixture");

    let engine = Engine::open().expect("open engine");
    let data = path.to_str().expect("utf8 path");

    let filter = RangeFilter::new(0.0, 20.0).expect("filter");
    let metrics = recompute(&engine, data, &filter).expect("recompute");
    assert_eq!(metrics.summary.total_trips, 4, "row at 25 excluded");
    let avg_dist = metrics.summary.avg_dist.expect("avg over 4 rows");
    assert!((avg_dist - 7.75).abs() < 1e-9);

    // Both boundaries are inclusive.
    let filter = RangeFilter::new(1.0, 25.0).expect("filter");
    let metrics = recompute(&engine, data, &filter).expect("recompute");
    assert_eq!(metrics.summary.total_trips, 5);
}

#[test]
fn summary_averages_are_absent_for_an_empty_filtered_set() {
    let path = temp_parquet("empty_filter");
    fixtures::write_trips(&path, &[trip(3, 2.0), trip(4, 4.0)]).expect("write fixture");

    let engine = Engine::open().expect("open engine");
    let filter = RangeFilter::new(30.0, 40.0).expect("filter");
    let metrics = recompute(&engine, path.to_str().unwrap(), &filter).expect("recompute");

    assert_eq!(metrics.summary.total_trips, 0);
    assert_eq!(metrics.summary.avg_fare, None);
    assert_eq!(metrics.summary.avg_dist, None);
    assert_eq!(metrics.summary.avg_tip, None);
    assert!(metrics.hourly.is_empty());
    assert!(metrics.sample.is_empty());
}

#[test]
fn hourly_histogram_skips_empty_hours_and_stays_ascending() {
    let path = temp_parquet("hourly");
    let trips = [0, 0, 5, 5, 5, 23]
        .into_iter()
        .map(|h| trip(h, 2.0))
        .collect::<Vec<_>>();
    fixtures::write_trips(&path, &trips).expect("write fixture");

    let engine = Engine::open().expect("open engine");
    let filter = RangeFilter::new(0.0, 50.0).expect("filter");
    let metrics = recompute(&engine, path.to_str().unwrap(), &filter).expect("recompute");

    assert_eq!(
        metrics.hourly,
        vec![
            HourlyBucket { hour: 0, trips: 2 },
            HourlyBucket { hour: 5, trips: 3 },
            HourlyBucket { hour: 23, trips: 1 },
        ]
    );
    for pair in metrics.hourly.windows(2) {
        assert!(pair[0].hour < pair[1].hour, "strictly ascending hours");
    }
    for bucket in &metrics.hourly {
        assert!((0..=23).contains(&bucket.hour));
    }
}

#[test]
fn scatter_sample_respects_cap_and_filtered_count() {
    let small = temp_parquet("sample_small");
    fixtures::write_trips(
        &small,
        &(0..50).map(|i| trip(i % 24, (i % 30) as f64)).collect::<Vec<_>>(),
    )
    .expect("write fixture");

    let engine = Engine::open().expect("open engine");
    let filter = RangeFilter::new(0.0, 50.0).expect("filter");
    let metrics = recompute(&engine, small.to_str().unwrap(), &filter).expect("recompute");
    assert!(metrics.sample.len() <= 50);

    let large = temp_parquet("sample_large");
    fixtures::generate_synthetic_trips(&large, 3000).expect("write fixture");
    let metrics = recompute(&engine, large.to_str().unwrap(), &filter).expect("recompute");
    assert!(metrics.sample.len() <= 1000);
    assert!(metrics.sample.len() <= metrics.summary.total_trips as usize);
}

#[test]
fn distance_bounds_report_min_and_max() {
    let path = temp_parquet("bounds");
    fixtures::write_trips(&path, &[trip(1, 0.5), trip(2, 12.0), trip(3, 3.0)])
        .expect("write fixture");

    let engine = Engine::open().expect("open engine");
    let (min, max) = distance_bounds(&engine, path.to_str().unwrap()).expect("bounds");
    assert_eq!(min, 0.5);
    assert_eq!(max, 12.0);
}

#[test]
fn distance_bounds_fail_as_data_source_errors() {
    let engine = Engine::open().expect("open engine");

    // Missing file: the engine cannot read the source at all.
    let err = distance_bounds(&engine, "/nonexistent/trips.parquet").unwrap_err();
    assert!(matches!(err, TxdError::DataSource(_)), "{err:?}");

    // Empty file: MIN/MAX come back NULL, so no default filter exists.
    let path = temp_parquet("bounds_empty");
    fixtures::write_trips(&path, &[]).expect("write fixture");
    let err = distance_bounds(&engine, path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, TxdError::DataSource(_)), "{err:?}");
}

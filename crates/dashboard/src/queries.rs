//! Pure SQL template builders over the parquet trip source.
//!
//! Every aggregate result is a function of (filter, source path, query
//! text) alone, so the query text itself is kept trivially inspectable:
//! plain string construction, unit-tested, no state.

use crate::filter::RangeFilter;

/// Upper bound on rows returned for the distance/tip scatter sample.
pub const SCATTER_SAMPLE_CAP: usize = 1000;

fn source_ref(path: &str) -> String {
    // Single quotes in the path are doubled for the SQL literal; the query
    // text itself is executed verbatim downstream.
    format!("read_parquet('{}')", path.replace('\'', "''"))
}

pub fn bounds_sql(path: &str) -> String {
    format!(
        "SELECT MIN(trip_distance) AS min_dist, MAX(trip_distance) AS max_dist FROM {}",
        source_ref(path)
    )
}

pub fn summary_sql(path: &str, filter: &RangeFilter) -> String {
    format!(
        "SELECT COUNT(*) AS total_trips, AVG(total_amount) AS avg_fare, \
         AVG(trip_distance) AS avg_dist, AVG(tip_amount) AS avg_tip \
         FROM {} WHERE trip_distance BETWEEN {} AND {}",
        source_ref(path),
        filter.low(),
        filter.high()
    )
}

pub fn hourly_sql(path: &str, filter: &RangeFilter) -> String {
    format!(
        "SELECT EXTRACT(HOUR FROM tpep_pickup_datetime) AS hour, COUNT(*) AS trip_count \
         FROM {} WHERE trip_distance BETWEEN {} AND {} \
         GROUP BY hour ORDER BY hour",
        source_ref(path),
        filter.low(),
        filter.high()
    )
}

pub fn sample_sql(path: &str, filter: &RangeFilter) -> String {
    format!(
        "SELECT trip_distance, tip_amount FROM {} \
         WHERE trip_distance BETWEEN {} AND {} USING SAMPLE {SCATTER_SAMPLE_CAP}",
        source_ref(path),
        filter.low(),
        filter.high()
    )
}

pub fn pushdown_sql(path: &str) -> String {
    format!(
        "SELECT passenger_count, AVG(trip_distance) AS avg_dist \
         FROM {} GROUP BY passenger_count ORDER BY passenger_count",
        source_ref(path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> RangeFilter {
        RangeFilter::new(0.5, 20.0).expect("valid filter")
    }

    #[test]
    fn filtered_queries_use_closed_between_interval() {
        for sql in [
            summary_sql("trips.parquet", &filter()),
            hourly_sql("trips.parquet", &filter()),
            sample_sql("trips.parquet", &filter()),
        ] {
            assert!(sql.contains("trip_distance BETWEEN 0.5 AND 20"), "{sql}");
            assert!(sql.contains("read_parquet('trips.parquet')"), "{sql}");
        }
    }

    #[test]
    fn sample_query_carries_the_cap() {
        let sql = sample_sql("trips.parquet", &filter());
        assert!(sql.contains("USING SAMPLE 1000"), "{sql}");
    }

    #[test]
    fn hourly_query_orders_by_hour() {
        let sql = hourly_sql("trips.parquet", &filter());
        assert!(sql.ends_with("GROUP BY hour ORDER BY hour"), "{sql}");
    }

    #[test]
    fn pushdown_query_groups_at_the_source() {
        let sql = pushdown_sql("trips.parquet");
        assert!(sql.contains("AVG(trip_distance)"), "{sql}");
        assert!(sql.contains("GROUP BY passenger_count"), "{sql}");
    }

    #[test]
    fn path_quotes_are_doubled() {
        let sql = bounds_sql("o'hare.parquet");
        assert!(sql.contains("read_parquet('o''hare.parquet')"), "{sql}");
    }
}

//! Consumer flows over the trip data source.
//!
//! Architecture role:
//! - [`metrics`]: filter-driven recomputation of the three aggregate results
//! - [`adhoc`]: verbatim user SQL with timed success or structured failure
//! - [`bench`]: materialize-then-aggregate vs push-down-aggregate comparison
//!
//! Supporting modules:
//! - [`filter`]: the validated trip-distance range filter
//! - [`queries`]: pure SQL template builders over the parquet source
//! - [`fixtures`]: deterministic synthetic trip parquet generation
//! - [`render`]: plain-text rendering for the CLI surfaces
//! - [`repl`]: the interactive session loop

pub mod adhoc;
pub mod bench;
pub mod filter;
pub mod fixtures;
pub mod metrics;
pub mod queries;
pub mod render;
pub mod repl;

pub use filter::RangeFilter;
pub use metrics::DashboardMetrics;

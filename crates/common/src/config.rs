use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Path to the read-only trip parquet file.
    pub data_path: String,
    /// Filter applied before the first user interaction.
    pub default_low: f64,
    pub default_high: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: "data/taxi_data.parquet".to_string(),
            default_low: 0.0,
            default_high: 20.0,
        }
    }
}

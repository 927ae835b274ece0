//! Shared configuration and error types for the txd crates.
//!
//! Architecture role:
//! - defines the dashboard configuration passed across layers
//! - provides the common [`TxdError`] / [`Result`] contracts
//!
//! Key modules:
//! - [`config`]
//! - [`error`]

pub mod config;
pub mod error;

pub use config::DashboardConfig;
pub use error::{Result, TxdError};

//! Query submission interface over an embedded analytical engine.
//!
//! Architecture role:
//! - owns the single long-lived DuckDB connection handle
//! - exposes exactly one capability: submit query text, receive a
//!   [`Table`] or a [`txd_common::TxdError::Execution`] failure
//!
//! The engine is treated as an opaque black box. Query text is executed
//! verbatim; nothing is parsed, planned, or sanitized on this side of the
//! boundary, and engine-internal types never leak past [`Table`].

mod engine;
mod table;

pub use engine::Engine;
pub use table::{CellValue, Table};

use std::time::Duration;

use txd_engine::{Engine, Table};

/// Outcome of one ad-hoc submission.
///
/// Timing and result are mutually exclusive: a completed query carries its
/// table and elapsed time, a failed one carries only the engine's message.
/// There is no retry; a failed query is never resubmitted.
#[derive(Debug)]
pub enum AdhocOutcome {
    Completed { table: Table, elapsed: Duration },
    Failed { message: String },
}

/// Execute user-supplied query text verbatim and measure it.
pub fn run_adhoc(engine: &Engine, sql: &str) -> AdhocOutcome {
    match engine.submit_timed(sql) {
        Ok((table, elapsed)) => AdhocOutcome::Completed { table, elapsed },
        Err(e) => AdhocOutcome::Failed {
            message: e.to_string(),
        },
    }
}

//! Run reporting boundary
//!
//! The engine reports one terminal outcome per run through a [`ReportSink`]:
//! either an end-of-run summary or a classified failure. Remote sinks
//! (search clusters, dashboards) implement the same trait outside this crate;
//! [`LogSink`] writes through tracing.

use crate::error::{EngineError, ErrorKind};
use async_trait::async_trait;

/// Accepts the terminal outcome of a run.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Called once on successful completion
    async fn end_of_run(&self, summary: &str);

    /// Called once on fatal failure. Domain errors carry a user-meaningful
    /// message and are reported verbatim; generic errors are stack-level
    /// failures reported together with the run's configuration snapshot.
    async fn report_failure(&self, error: &EngineError, config_snapshot: &str);
}

/// Reports through the tracing stack
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    async fn end_of_run(&self, summary: &str) {
        tracing::info!(summary = %summary, "Trading run finished");
    }

    async fn report_failure(&self, error: &EngineError, config_snapshot: &str) {
        match error.kind() {
            ErrorKind::Domain => {
                tracing::error!(error = %error, "Trading run failed");
            }
            ErrorKind::Generic => {
                tracing::error!(
                    error = %error,
                    config = %config_snapshot,
                    "Trading run failed with stack-level error"
                );
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Records every report for assertion
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub summaries: Mutex<Vec<String>>,
        pub failures: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        async fn end_of_run(&self, summary: &str) {
            self.summaries.lock().unwrap().push(summary.to_string());
        }

        async fn report_failure(&self, error: &EngineError, _config_snapshot: &str) {
            self.failures.lock().unwrap().push(error.to_string());
        }
    }
}

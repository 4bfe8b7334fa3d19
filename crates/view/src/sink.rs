//! Error sinks
//!
//! The orchestrator never stops on a failed call. Every failure is handed
//! to an `ErrorSink` and the state machine moves on.

use smallcrud_core::CrudError;
use tracing::error;

/// Receives failures swallowed by the orchestrator
pub trait ErrorSink {
    /// Record a failure of `operation`
    fn report(&self, operation: &str, error: &CrudError);
}

/// Sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, operation: &str, err: &CrudError) {
        error!(operation, error = %err, "Operation failed");
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for std::sync::Arc<S> {
    fn report(&self, operation: &str, error: &CrudError) {
        (**self).report(operation, error)
    }
}

#[cfg(test)]
pub(crate) use collecting::CollectingSink;

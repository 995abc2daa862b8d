//! Fire-and-forget submission.
//!
//! Saving must not block further edits. The submission runs on its own
//! thread and its outcome goes to the log; callers that care may join the
//! handle, but nothing in the mapping session waits on it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;
use tracing::{error, info};

use crate::PersistenceGateway;
use crate::error::{GatewayError, Result};

/// Handle to a submission running in the background.
pub struct PendingSubmission {
    handle: JoinHandle<Result<Value>>,
}

impl PendingSubmission {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the submission completes.
    pub fn wait(self) -> Result<Value> {
        self.handle.join().unwrap_or(Err(GatewayError::Panicked))
    }
}

/// Submit `records` on a background thread, logging the outcome.
pub fn submit_detached<G>(gateway: Arc<G>, records: Vec<Value>) -> PendingSubmission
where
    G: PersistenceGateway + Send + Sync + 'static + ?Sized,
{
    let handle = thread::spawn(move || {
        let result = gateway.submit(&records);
        match &result {
            Ok(response) => info!(records = records.len(), %response, "data saved successfully"),
            Err(err) => error!(records = records.len(), error = %err, "error saving data"),
        }
        result
    });
    PendingSubmission { handle }
}

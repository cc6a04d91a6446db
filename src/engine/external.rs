//! External reasoning collaborator seam.
//!
//! Deep mode may consult an external model for additional typed
//! evidence hints. The call is bounded by a timeout; on timeout or
//! error the caller degrades to local evidence. Retries, if any,
//! belong to the collaborator, not to this engine.

use crate::core::{Error, ExternalHint, Result};
use crossbeam::channel::{bounded, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Rule id attached to evidence merged from an external reasoner.
pub const EXTERNAL_RULE_ID: &str = "external_reasoner";

/// A collaborator that, given the document text, returns additional
/// typed evidence hints. Implementations are expected to be slow
/// (network, subprocess); the engine never calls this on the fast path.
pub trait ExternalReasoner: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str {
        "external"
    }

    fn reason(&self, text: &str) -> Result<Vec<ExternalHint>>;
}

/// Invoke the reasoner on a worker thread, waiting at most `timeout`.
///
/// A worker that outlives the timeout keeps running to completion in
/// the background; its late result is dropped when the channel's
/// receiver is gone.
pub(crate) fn reason_with_timeout(
    reasoner: &Arc<dyn ExternalReasoner>,
    text: &str,
    timeout: Duration,
) -> Result<Vec<ExternalHint>> {
    let (tx, rx) = bounded(1);
    let worker = Arc::clone(reasoner);
    let text = text.to_string();

    thread::Builder::new()
        .name("vibecheck-external".to_string())
        .spawn(move || {
            let _ = tx.send(worker.reason(&text));
        })
        .map_err(|e| Error::External(format!("failed to spawn reasoner thread: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(Error::External(format!(
            "timed out after {timeout:?}"
        ))),
        Err(RecvTimeoutError::Disconnected) => {
            Err(Error::External("reasoner worker terminated abnormally".to_string()))
        }
    }
}

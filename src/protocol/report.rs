use serde::{Deserialize, Serialize};

use crate::core::data::worker_id::WorkerId;
use crate::core::timing::record::WorkerTimings;
use crate::worker::errors::WorkerError;

/// Sent once per completed `Init` render and once per completed `Exec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub worker_id: WorkerId,
    pub fractal: String,
    pub times: WorkerTimings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerFailure {
    pub worker_id: WorkerId,
    pub error: WorkerError,
}

/// Everything a worker sends back on its report channel.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    ExecComplete(CompletionReport),
    /// The worker hit a fatal error and has stopped.
    Failed(WorkerFailure),
}

impl WorkerEvent {
    #[must_use]
    pub fn worker_id(&self) -> WorkerId {
        match self {
            Self::ExecComplete(report) => report.worker_id,
            Self::Failed(failure) => failure.worker_id,
        }
    }
}

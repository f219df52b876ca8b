use std::error::Error;
use std::fmt;

use crate::core::compute::ports::compute_module::InstantiationError;
use crate::core::data::region_descriptor::RegionError;
use crate::core::data::worker_id::WorkerId;
use crate::core::surface::output_surface::SurfaceError;
use crate::protocol::command::CommandKind;
use crate::worker::state::WorkerState;

/// Every variant is fatal to the worker that raised it.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerError {
    InstantiationFailed(InstantiationError),
    ProtocolViolation {
        command: CommandKind,
        state: WorkerState,
    },
    WorkerIdMismatch {
        assigned: WorkerId,
        received: WorkerId,
    },
    InvalidParameters(RegionError),
    OutOfBoundsWrite(SurfaceError),
    Disconnected(WorkerId),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstantiationFailed(err) => write!(f, "instantiation failed: {}", err),
            Self::ProtocolViolation { command, state } => {
                write!(f, "protocol violation: '{}' received while {}", command, state)
            }
            Self::WorkerIdMismatch { assigned, received } => {
                write!(
                    f,
                    "protocol violation: worker {} received init for worker {}",
                    assigned, received
                )
            }
            Self::InvalidParameters(err) => write!(f, "invalid parameters: {}", err),
            Self::OutOfBoundsWrite(err) => write!(f, "out of bounds write: {}", err),
            Self::Disconnected(worker_id) => write!(f, "worker {} is no longer running", worker_id),
        }
    }
}

impl Error for WorkerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InstantiationFailed(err) => Some(err),
            Self::InvalidParameters(err) => Some(err),
            Self::OutOfBoundsWrite(err) => Some(err),
            Self::ProtocolViolation { .. }
            | Self::WorkerIdMismatch { .. }
            | Self::Disconnected(_) => None,
        }
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::core::compute::host::HostCapabilities;
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::data::worker_id::WorkerId;
use crate::protocol::command::{Command, CommandKind};
use crate::protocol::report::{CompletionReport, WorkerEvent};

#[derive(Debug)]
pub enum WireError {
    Envelope(serde_json::Error),
    Payload {
        action: CommandKind,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope(err) => write!(f, "malformed message: {}", err),
            Self::Payload { action, source } => {
                write!(f, "malformed payload for '{}': {}", action, source)
            }
            Self::Encode(err) => write!(f, "failed to encode message: {}", err),
        }
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Envelope(err) | Self::Encode(err) => Some(err),
            Self::Payload { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InboundEnvelope {
    action: String,
    #[serde(default)]
    payload: serde_json::Value,
}

// `host_fns` may be present on the wire; it is ignored in favour of the
// capabilities handed to `decode_inbound`.
#[derive(Debug, Deserialize)]
struct InitPayload {
    worker_id: WorkerId,
    fractal: RegionDescriptor,
    max_iters: u32,
}

#[derive(Debug, Deserialize)]
struct RefreshPalettePayload {
    max_iters: u32,
}

#[derive(Debug, Deserialize)]
struct ExecPayload {
    fractal: RegionDescriptor,
    max_iters: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub worker_id: WorkerId,
    pub message: String,
}

/// Messages a worker posts back, `{status, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum OutboundMessage {
    ExecComplete(CompletionReport),
    Error(ErrorPayload),
}

impl From<&WorkerEvent> for OutboundMessage {
    fn from(event: &WorkerEvent) -> Self {
        match event {
            WorkerEvent::ExecComplete(report) => Self::ExecComplete(report.clone()),
            WorkerEvent::Failed(failure) => Self::Error(ErrorPayload {
                worker_id: failure.worker_id,
                message: failure.error.to_string(),
            }),
        }
    }
}

fn payload<T: DeserializeOwned>(
    action: CommandKind,
    value: serde_json::Value,
) -> Result<T, WireError> {
    serde_json::from_value(value).map_err(|source| WireError::Payload { action, source })
}

/// Decodes an inbound `{action, payload}` message.
///
/// Unknown actions are not an error: they are logged and yield `Ok(None)`.
pub fn decode_inbound(
    message: &str,
    host: &HostCapabilities,
) -> Result<Option<Command>, WireError> {
    let envelope: InboundEnvelope = serde_json::from_str(message).map_err(WireError::Envelope)?;

    let command = match envelope.action.as_str() {
        "init" => {
            let init: InitPayload = payload(CommandKind::Init, envelope.payload)?;
            Command::Init {
                worker_id: init.worker_id,
                host: host.clone(),
                region: init.fractal.with_max_iters(init.max_iters),
                max_iters: init.max_iters,
            }
        }
        "refresh_colour_palette" => {
            let refresh: RefreshPalettePayload =
                payload(CommandKind::RefreshPalette, envelope.payload)?;
            Command::RefreshPalette {
                max_iters: refresh.max_iters,
            }
        }
        "exec" => {
            let exec: ExecPayload = payload(CommandKind::Exec, envelope.payload)?;
            Command::Exec {
                region: exec.fractal.with_max_iters(exec.max_iters),
                max_iters: exec.max_iters,
            }
        }
        unknown => {
            tracing::warn!(action = unknown, "ignoring message with unknown action");
            return Ok(None);
        }
    };

    Ok(Some(command))
}

pub fn encode_event(event: &WorkerEvent) -> Result<String, WireError> {
    serde_json::to_string(&OutboundMessage::from(event)).map_err(WireError::Encode)
}

pub fn decode_outbound(message: &str) -> Result<OutboundMessage, WireError> {
    serde_json::from_str(message).map_err(WireError::Envelope)
}

//! The coordinator/worker message contract.
//!
//! In process the two sides exchange [`Command`]s and [`WorkerEvent`]s over
//! channels; [`wire`] maps both onto the JSON shape used across a message
//! port.

pub mod command;
pub mod report;
pub mod wire;

pub use command::{Command, CommandKind};
pub use report::{CompletionReport, WorkerEvent, WorkerFailure};

//! The Worker Unit: one thread, one compute module, one command queue.
//!
//! [`unit::WorkerUnit`] is the state machine and can be driven directly.
//! [`runtime::WorkerHandle`] runs it on its own thread behind a command
//! channel and forwards its output to a shared report channel.

pub mod errors;
pub mod runtime;
pub mod state;
pub mod unit;

pub use errors::WorkerError;
pub use runtime::WorkerHandle;
pub use state::WorkerState;
pub use unit::WorkerUnit;

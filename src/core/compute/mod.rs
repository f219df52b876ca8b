//! Compute modules: the opaque numeric units that own a palette and plot
//! regions into the shared surface.
//!
//! The worker only knows the [`ports`] traits. [`native`] is the in-process
//! backend used by the binary and benchmarks.

pub mod host;
pub mod native;
pub mod ports;

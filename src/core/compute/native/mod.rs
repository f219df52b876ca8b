pub mod escape_time;
pub mod module;
pub mod palette;

pub use module::{NativeComputeModule, NativeModuleLoader};

pub mod compute_module;

pub use compute_module::{ComputeModule, ComputeModuleLoader, InstantiationError};

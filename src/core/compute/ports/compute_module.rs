use std::error::Error;
use std::fmt;

use crate::core::compute::host::HostCapabilities;
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::surface::output_surface::SurfaceError;

#[derive(Debug, Clone, PartialEq)]
pub enum InstantiationError {
    MissingSurface,
    Backend(String),
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSurface => {
                write!(f, "host capabilities do not provide an output surface")
            }
            Self::Backend(message) => write!(f, "compute module failed to load: {}", message),
        }
    }
}

impl Error for InstantiationError {}

/// One instantiated compute module.
///
/// Implementations are not reentrant. The owning worker guarantees calls are
/// never concurrent, so implementations need no locking of their own.
pub trait ComputeModule: Send {
    /// Rebuilds this instance's palette for `max_iters` (always positive).
    fn generate_palette(&mut self, max_iters: u32);

    /// Writes exactly `region.width * region.height` pixels at
    /// `region.image_offset` and nothing outside that span.
    fn plot(&mut self, region: &RegionDescriptor) -> Result<(), SurfaceError>;
}

/// Produces ready-to-call module instances, one per worker.
pub trait ComputeModuleLoader: Send + 'static {
    type Module: ComputeModule;

    fn instantiate(&self, host: &HostCapabilities) -> Result<Self::Module, InstantiationError>;
}

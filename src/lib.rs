pub mod controllers;
pub mod core;
pub mod presenters;
pub mod protocol;
pub mod storage;
pub mod worker;

pub use controllers::cli::render::CliRenderController;
pub use controllers::coordinator::config::{FractalKind, PoolConfig, RenderSettings, View};
pub use controllers::coordinator::coordinator::{RenderCoordinator, RenderFrame};
pub use controllers::coordinator::errors::{ConfigError, CoordinatorError, LayoutError};
pub use controllers::coordinator::timings::RenderTimings;
pub use core::compute::host::HostCapabilities;
pub use core::compute::native::{NativeComputeModule, NativeModuleLoader};
pub use core::compute::ports::compute_module::{
    ComputeModule, ComputeModuleLoader, InstantiationError,
};
pub use core::data::complex::Complex;
pub use core::data::region_descriptor::RegionDescriptor;
pub use core::data::worker_id::WorkerId;
pub use core::surface::output_surface::{OutputSurface, SurfaceError};
pub use presenters::file::ppm::PpmFilePresenter;
pub use protocol::{Command, CommandKind, CompletionReport, WorkerEvent, WorkerFailure};
pub use worker::{WorkerError, WorkerHandle, WorkerState, WorkerUnit};

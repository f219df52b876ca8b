use std::error::Error;
use std::fmt;

use crate::core::data::region_descriptor::RegionError;
use crate::core::data::worker_id::WorkerId;
use crate::core::surface::output_surface::SurfaceError;
use crate::protocol::report::WorkerFailure;
use crate::worker::errors::WorkerError;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConfigError {
    ZeroImageSize { width: u32, height: u32 },
    ZeroMaxIterations,
    InvalidZoom(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroImageSize { width, height } => {
                write!(f, "image size must be positive: {}x{}", width, height)
            }
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidZoom(zoom) => {
                write!(f, "zoom must be finite and greater than zero, got {}", zoom)
            }
        }
    }
}

impl Error for ConfigError {}

/// A region assignment that would let workers write outside the surface,
/// over each other, or leave part of the image unwritten.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidRegion { worker_id: WorkerId, error: RegionError },
    OutOfBounds {
        worker_id: WorkerId,
        end: usize,
        surface_len: usize,
    },
    Overlap { first: WorkerId, second: WorkerId },
    Gap { start: usize, end: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion { worker_id, error } => {
                write!(f, "region for worker {} is invalid: {}", worker_id, error)
            }
            Self::OutOfBounds {
                worker_id,
                end,
                surface_len,
            } => {
                write!(
                    f,
                    "region for worker {} ends at {} past surface of {} pixels",
                    worker_id, end, surface_len
                )
            }
            Self::Overlap { first, second } => {
                write!(f, "regions for workers {} and {} overlap", first, second)
            }
            Self::Gap { start, end } => {
                write!(f, "pixels {}..{} are not assigned to any worker", start, end)
            }
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRegion { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum CoordinatorError {
    Config(ConfigError),
    Surface(SurfaceError),
    Layout(LayoutError),
    Spawn(std::io::Error),
    Dispatch(WorkerError),
    WorkerFailed(WorkerFailure),
    Timeout { missing: Vec<WorkerId> },
    Disconnected,
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {}", err),
            Self::Surface(err) => write!(f, "output surface error: {}", err),
            Self::Layout(err) => write!(f, "invalid region layout: {}", err),
            Self::Spawn(err) => write!(f, "failed to spawn worker thread: {}", err),
            Self::Dispatch(err) => write!(f, "failed to dispatch command: {}", err),
            Self::WorkerFailed(failure) => {
                write!(f, "worker {} failed: {}", failure.worker_id, failure.error)
            }
            Self::Timeout { missing } => {
                let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
                write!(f, "timed out waiting for workers [{}]", ids.join(", "))
            }
            Self::Disconnected => write!(f, "every worker has stopped"),
        }
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Surface(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Spawn(err) => Some(err),
            Self::Dispatch(err) => Some(err),
            Self::WorkerFailed(failure) => Some(&failure.error),
            Self::Timeout { .. } | Self::Disconnected => None,
        }
    }
}

impl From<ConfigError> for CoordinatorError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SurfaceError> for CoordinatorError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<LayoutError> for CoordinatorError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<WorkerError> for CoordinatorError {
    fn from(err: WorkerError) -> Self {
        Self::Dispatch(err)
    }
}

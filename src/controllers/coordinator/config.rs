use std::num::NonZeroU32;
use std::time::Duration;

use crate::controllers::coordinator::errors::ConfigError;
use crate::core::data::complex::Complex;
use crate::core::data::region_descriptor::{JULIA_NAME, MANDELBROT_NAME};
use crate::core::util::row_bands::available_workers;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_MAX_ITERS: u32 = 256;
pub const DEFAULT_ZOOM: f64 = 200.0;
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia,
}

impl FractalKind {
    /// The fractal name carried in completion reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mandelbrot => MANDELBROT_NAME,
            Self::Julia => JULIA_NAME,
        }
    }
}

/// What the whole image shows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub fractal: FractalKind,
    /// Plane coordinates of the image centre.
    pub centre: Complex,
    /// Pixels per unit of the fractal plane.
    pub zoom: f64,
    /// `c` for Julia renders.
    pub julia_constant: Complex,
}

impl Default for View {
    fn default() -> Self {
        Self {
            fractal: FractalKind::Mandelbrot,
            centre: Complex::new(-0.75, 0.0),
            zoom: DEFAULT_ZOOM,
            julia_constant: Complex::new(-0.7, 0.27),
        }
    }
}

impl View {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(ConfigError::InvalidZoom(self.zoom));
        }

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderSettings {
    pub view: View,
    pub max_iters: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            view: View::default(),
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }

        self.view.validate()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PoolConfig {
    pub worker_count: NonZeroU32,
    pub width: u32,
    pub height: u32,
    /// How long to wait for every worker to report on one request.
    pub report_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: available_workers(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroImageSize {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }
}

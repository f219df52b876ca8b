use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::ops::Range;

use crate::core::data::complex::Complex;

pub const MANDELBROT_NAME: &str = "mandel";
pub const JULIA_NAME: &str = "julia";

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RegionError {
    Empty { width: u32, height: u32 },
    ZeroMaxIterations,
    InvalidZoom(f64),
    SpanOverflow { image_offset: usize, width: u32, height: u32 },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { width, height } => {
                write!(f, "region size must be positive: {}x{}", width, height)
            }
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidZoom(zoom) => {
                write!(f, "zoom must be finite and greater than zero, got {}", zoom)
            }
            Self::SpanOverflow {
                image_offset,
                width,
                height,
            } => {
                write!(
                    f,
                    "region {}x{} at offset {} overflows the addressable range",
                    width, height, image_offset
                )
            }
        }
    }
}

impl Error for RegionError {}

/// One worker's slice of the image: where it sits in the fractal plane and
/// where its pixels land in the shared output surface.
///
/// Pixel `(px, py)` of the region maps to the plane point
/// `(origin_x + px / zoom, origin_y - py / zoom)`. For Julia renders
/// `(center_x, center_y)` is the constant `c`; Mandelbrot renders ignore it.
///
/// Field names on the wire follow the browser message format, hence the
/// renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    #[serde(default = "default_name")]
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub origin_x: f64,
    pub origin_y: f64,
    #[serde(rename = "mandel_x")]
    pub center_x: f64,
    #[serde(rename = "mandel_y")]
    pub center_y: f64,
    pub zoom: f64,
    #[serde(default, skip_serializing)]
    pub max_iters: u32,
    #[serde(rename = "isMandelbrot")]
    pub is_mandelbrot: bool,
    #[serde(rename = "imgOffset")]
    pub image_offset: usize,
}

fn default_name() -> String {
    MANDELBROT_NAME.to_string()
}

impl RegionDescriptor {
    pub fn validate(&self) -> Result<(), RegionError> {
        if self.width == 0 || self.height == 0 {
            return Err(RegionError::Empty {
                width: self.width,
                height: self.height,
            });
        }

        if self.max_iters == 0 {
            return Err(RegionError::ZeroMaxIterations);
        }

        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(RegionError::InvalidZoom(self.zoom));
        }

        self.span().map(|_| ())
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Cell range `[image_offset, image_offset + width * height)` this region
    /// writes in the output surface.
    pub fn span(&self) -> Result<Range<usize>, RegionError> {
        self.image_offset
            .checked_add(self.pixel_count())
            .map(|end| self.image_offset..end)
            .ok_or(RegionError::SpanOverflow {
                image_offset: self.image_offset,
                width: self.width,
                height: self.height,
            })
    }

    #[must_use]
    pub fn pixel_to_plane(&self, px: u32, py: u32) -> Complex {
        Complex::new(
            self.origin_x + px as f64 / self.zoom,
            self.origin_y - py as f64 / self.zoom,
        )
    }

    #[must_use]
    pub fn julia_constant(&self) -> Complex {
        Complex::new(self.center_x, self.center_y)
    }

    #[must_use]
    pub fn with_max_iters(self, max_iters: u32) -> Self {
        Self { max_iters, ..self }
    }
}

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    ZeroSize { width: u32, height: u32 },
    OutOfBounds {
        offset: usize,
        len: usize,
        surface_len: usize,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize { width, height } => {
                write!(f, "surface size must be positive: {}x{}", width, height)
            }
            Self::OutOfBounds {
                offset,
                len,
                surface_len,
            } => {
                write!(
                    f,
                    "write of {} pixels at offset {} exceeds surface of {} pixels",
                    len, offset, surface_len
                )
            }
        }
    }
}

impl Error for SurfaceError {}

/// The image every worker writes into.
///
/// Cells are packed RGBA. Clones share the same storage, the way every module
/// instance sees the same memory. Workers only ever write through a
/// [`SurfaceSpan`], and the coordinator hands out non-overlapping spans, so no
/// lock is taken on the write path.
#[derive(Debug, Clone)]
pub struct OutputSurface {
    width: u32,
    height: u32,
    cells: Arc<[AtomicU32]>,
}

impl OutputSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSize { width, height });
        }

        let cells = (0..width as usize * height as usize)
            .map(|_| AtomicU32::new(0))
            .collect();

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrows `[offset, offset + len)` for writing.
    pub fn span(&self, offset: usize, len: usize) -> Result<SurfaceSpan<'_>, SurfaceError> {
        let out_of_bounds = SurfaceError::OutOfBounds {
            offset,
            len,
            surface_len: self.cells.len(),
        };
        let end = offset.checked_add(len).ok_or(out_of_bounds)?;

        self.cells
            .get(offset..end)
            .map(|cells| SurfaceSpan { offset, cells })
            .ok_or(out_of_bounds)
    }

    pub fn fill(&self, value: u32) {
        for cell in self.cells.iter() {
            cell.store(value, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }

    #[must_use]
    pub fn to_pixel_buffer(&self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width, self.height);

        for (index, cell) in self.cells.iter().enumerate() {
            buffer.set_index(index, Colour::from_rgba(cell.load(Ordering::Relaxed)));
        }

        buffer
    }
}

/// A bounds-checked window onto part of an [`OutputSurface`].
#[derive(Debug)]
pub struct SurfaceSpan<'a> {
    offset: usize,
    cells: &'a [AtomicU32],
}

impl<'a> SurfaceSpan<'a> {
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells of the span, for callers that split it across threads.
    #[must_use]
    pub fn cells(&self) -> &'a [AtomicU32] {
        self.cells
    }

    /// Writes `value` at `index` relative to the span start. Returns `false`
    /// when `index` is past the end of the span.
    pub fn write(&self, index: usize, value: u32) -> bool {
        match self.cells.get(index) {
            Some(cell) => {
                cell.store(value, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_zeroed_surface() {
        let surface = OutputSurface::new(4, 3).unwrap();

        assert_eq!(surface.len(), 12);
        assert!(surface.snapshot().iter().all(|&cell| cell == 0));
    }

    #[test]
    fn test_surface_must_not_be_empty() {
        assert_eq!(
            OutputSurface::new(0, 3).unwrap_err(),
            SurfaceError::ZeroSize { width: 0, height: 3 }
        );
    }

    #[test]
    fn test_span_within_bounds() {
        let surface = OutputSurface::new(4, 4).unwrap();
        let span = surface.span(8, 8).unwrap();

        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 8);
    }

    #[test]
    fn test_span_past_end_is_out_of_bounds() {
        let surface = OutputSurface::new(4, 4).unwrap();

        assert_eq!(
            surface.span(12, 8).unwrap_err(),
            SurfaceError::OutOfBounds {
                offset: 12,
                len: 8,
                surface_len: 16
            }
        );
        assert!(surface.span(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_span_writes_are_relative_and_bounded() {
        let surface = OutputSurface::new(4, 2).unwrap();
        let span = surface.span(2, 3).unwrap();

        assert!(span.write(0, 7));
        assert!(span.write(2, 9));
        assert!(!span.write(3, 11));

        assert_eq!(surface.snapshot(), vec![0, 0, 7, 0, 9, 0, 0, 0]);
    }

    #[test]
    fn test_clones_share_storage() {
        let surface = OutputSurface::new(2, 2).unwrap();
        let shared = surface.clone();

        shared.span(0, 4).unwrap().write(3, 42);

        assert_eq!(surface.snapshot()[3], 42);
    }

    #[test]
    fn test_to_pixel_buffer_unpacks_rgb() {
        let surface = OutputSurface::new(2, 2).unwrap();
        surface.fill(Colour { r: 1, g: 2, b: 3 }.to_rgba());

        let buffer = surface.to_pixel_buffer();

        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.buffer(), &vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }
}

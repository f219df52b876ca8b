use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Somewhere a finished image can be saved.
pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()>;
}

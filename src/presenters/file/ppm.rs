use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_ppm::write_ppm;
use std::path::Path;

#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        tracing::debug!(path = %filepath.display(), "writing ppm");

        write_ppm(buffer, filepath)
    }
}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

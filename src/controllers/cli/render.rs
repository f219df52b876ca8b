use std::path::Path;

use crate::controllers::coordinator::config::{PoolConfig, RenderSettings};
use crate::controllers::coordinator::coordinator::{RenderCoordinator, RenderFrame};
use crate::controllers::coordinator::errors::CoordinatorError;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::compute::native::module::NativeModuleLoader;
use crate::core::compute::ports::compute_module::ComputeModuleLoader;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Renders one image with a worker pool and hands it to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    config: PoolConfig,
    settings: RenderSettings,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P, config: PoolConfig, settings: RenderSettings) -> Self {
        Self {
            presenter,
            config,
            settings,
            buffer: None,
        }
    }

    pub fn generate(&mut self) -> Result<RenderFrame, CoordinatorError> {
        self.generate_with(NativeModuleLoader)
    }

    pub fn generate_with<L>(&mut self, loader: L) -> Result<RenderFrame, CoordinatorError>
    where
        L: ComputeModuleLoader + Clone,
    {
        let (mut coordinator, frame) = RenderCoordinator::start(self.config, self.settings, loader)?;
        self.buffer = Some(coordinator.surface().to_pixel_buffer());
        coordinator.shutdown();

        Ok(frame)
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Writes the last generated image. Does nothing before `generate`.
    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath.as_ref())?
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::num::NonZeroU32;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingPresenter {
        presented: RefCell<Vec<(PathBuf, u32, u32)>>,
    }

    impl FilePresenterPort for RecordingPresenter {
        fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
            self.presented.borrow_mut().push((
                filepath.to_path_buf(),
                buffer.width(),
                buffer.height(),
            ));
            Ok(())
        }
    }

    fn create_controller() -> CliRenderController<RecordingPresenter> {
        CliRenderController::new(
            RecordingPresenter::default(),
            PoolConfig {
                worker_count: NonZeroU32::new(2).unwrap(),
                width: 16,
                height: 8,
                report_timeout: Duration::from_secs(10),
            },
            RenderSettings::default(),
        )
    }

    #[test]
    fn test_write_before_generate_does_nothing() {
        let controller = create_controller();

        controller.write("unused.ppm").unwrap();

        assert!(controller.presenter.presented.borrow().is_empty());
    }

    #[test]
    fn test_generate_then_write_presents_whole_image() {
        let mut controller = create_controller();

        let frame = controller.generate().unwrap();
        controller.write("out.ppm").unwrap();

        assert_eq!(frame.timings.per_worker.len(), 2);
        assert_eq!(controller.buffer().map(PixelBuffer::buffer_size), Some(16 * 8 * 3));
        assert_eq!(
            *controller.presenter.presented.borrow(),
            vec![(PathBuf::from("out.ppm"), 16, 8)]
        );
    }
}

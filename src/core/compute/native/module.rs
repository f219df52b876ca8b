use rayon::prelude::*;
use std::sync::atomic::Ordering;

use crate::core::compute::host::HostCapabilities;
use crate::core::compute::native::escape_time::{julia, mandelbrot};
use crate::core::compute::native::palette::Palette;
use crate::core::compute::ports::compute_module::{
    ComputeModule, ComputeModuleLoader, InstantiationError,
};
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::surface::output_surface::{OutputSurface, SurfaceError};

/// Escape-time Mandelbrot/Julia plotter running on the calling thread plus
/// rayon's pool for rows.
#[derive(Debug)]
pub struct NativeComputeModule {
    host: HostCapabilities,
    surface: OutputSurface,
    palette: Palette,
}

impl NativeComputeModule {
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl ComputeModule for NativeComputeModule {
    fn generate_palette(&mut self, max_iters: u32) {
        self.palette = Palette::generate(max_iters);
        self.host
            .log(&format!("palette generated for max_iters={}", max_iters));
    }

    fn plot(&mut self, region: &RegionDescriptor) -> Result<(), SurfaceError> {
        let span = self
            .surface
            .span(region.image_offset, region.pixel_count())?;

        if span.is_empty() {
            return Ok(());
        }

        let palette = &self.palette;
        let julia_constant = region.julia_constant();
        let width = region.width as usize;

        span.cells()
            .par_chunks(width)
            .enumerate()
            .for_each(|(py, row)| {
                for (px, cell) in row.iter().enumerate() {
                    let point = region.pixel_to_plane(px as u32, py as u32);
                    let iterations = if region.is_mandelbrot {
                        mandelbrot(point, region.max_iters)
                    } else {
                        julia(point, julia_constant, region.max_iters)
                    };

                    cell.store(palette.cell(iterations), Ordering::Relaxed);
                }
            });

        Ok(())
    }
}

/// Instantiates [`NativeComputeModule`]s bound to the surface found in the
/// host capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeModuleLoader;

impl ComputeModuleLoader for NativeModuleLoader {
    type Module = NativeComputeModule;

    fn instantiate(&self, host: &HostCapabilities) -> Result<Self::Module, InstantiationError> {
        let surface = host
            .surface()
            .cloned()
            .ok_or(InstantiationError::MissingSurface)?;

        Ok(NativeComputeModule {
            host: host.clone(),
            surface,
            palette: Palette::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::region_descriptor::MANDELBROT_NAME;

    const SENTINEL: u32 = 0x0102_0304;

    fn create_region(width: u32, height: u32, image_offset: usize) -> RegionDescriptor {
        RegionDescriptor {
            name: MANDELBROT_NAME.to_string(),
            width,
            height,
            origin_x: -2.0,
            origin_y: 1.0,
            center_x: -0.7,
            center_y: 0.27,
            zoom: 2.0,
            max_iters: 50,
            is_mandelbrot: true,
            image_offset,
        }
    }

    fn create_module(surface: &OutputSurface) -> NativeComputeModule {
        NativeModuleLoader
            .instantiate(&HostCapabilities::new().with_surface(surface.clone()))
            .unwrap()
    }

    #[test]
    fn test_instantiate_requires_surface() {
        let result = NativeModuleLoader.instantiate(&HostCapabilities::new());

        assert_eq!(result.unwrap_err(), InstantiationError::MissingSurface);
    }

    #[test]
    fn test_generate_palette_replaces_palette() {
        let surface = OutputSurface::new(4, 4).unwrap();
        let mut module = create_module(&surface);

        assert!(module.palette().is_empty());
        module.generate_palette(64);
        assert_eq!(module.palette().max_iters(), 64);
        module.generate_palette(32);
        assert_eq!(module.palette().max_iters(), 32);
    }

    #[test]
    fn test_plot_writes_exactly_its_span() {
        let surface = OutputSurface::new(4, 4).unwrap();
        surface.fill(SENTINEL);
        let mut module = create_module(&surface);
        module.generate_palette(50);

        module.plot(&create_region(4, 2, 4)).unwrap();

        let cells = surface.snapshot();
        assert!(cells[..4].iter().all(|&cell| cell == SENTINEL));
        assert!(cells[4..12].iter().all(|&cell| cell != SENTINEL));
        assert!(cells[12..].iter().all(|&cell| cell == SENTINEL));
    }

    #[test]
    fn test_plot_of_empty_region_writes_nothing() {
        let surface = OutputSurface::new(4, 4).unwrap();
        surface.fill(SENTINEL);
        let mut module = create_module(&surface);

        module.plot(&create_region(0, 2, 4)).unwrap();
        module.plot(&create_region(4, 0, 4)).unwrap();

        assert!(surface.snapshot().iter().all(|&cell| cell == SENTINEL));
    }

    #[test]
    fn test_plot_out_of_bounds_writes_nothing() {
        let surface = OutputSurface::new(4, 4).unwrap();
        surface.fill(SENTINEL);
        let mut module = create_module(&surface);

        let result = module.plot(&create_region(4, 2, 12));

        assert!(matches!(result, Err(SurfaceError::OutOfBounds { .. })));
        assert!(surface.snapshot().iter().all(|&cell| cell == SENTINEL));
    }

    #[test]
    fn test_plot_without_palette_is_black() {
        let surface = OutputSurface::new(4, 2).unwrap();
        let mut module = create_module(&surface);

        module.plot(&create_region(4, 2, 0)).unwrap();

        assert!(surface
            .snapshot()
            .iter()
            .all(|&cell| cell == Colour::BLACK.to_rgba()));
    }

    #[test]
    fn test_julia_and_mandelbrot_differ() {
        let surface = OutputSurface::new(8, 8).unwrap();
        let mut module = create_module(&surface);
        module.generate_palette(50);

        module.plot(&create_region(8, 8, 0)).unwrap();
        let mandelbrot_cells = surface.snapshot();

        let mut region = create_region(8, 8, 0);
        region.is_mandelbrot = false;
        module.plot(&region).unwrap();

        assert_ne!(surface.snapshot(), mandelbrot_cells);
    }

    #[test]
    fn test_plot_is_deterministic_across_instances() {
        let surface_a = OutputSurface::new(8, 4).unwrap();
        let surface_b = OutputSurface::new(8, 4).unwrap();
        let mut module_a = create_module(&surface_a);
        let mut module_b = create_module(&surface_b);
        module_a.generate_palette(50);
        module_b.generate_palette(50);

        module_a.plot(&create_region(8, 4, 0)).unwrap();
        module_b.plot(&create_region(8, 4, 0)).unwrap();

        assert_eq!(surface_a.snapshot(), surface_b.snapshot());
    }
}

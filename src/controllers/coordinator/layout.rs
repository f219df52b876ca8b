use crate::controllers::coordinator::config::{FractalKind, View};
use crate::controllers::coordinator::errors::LayoutError;
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::data::worker_id::WorkerId;
use crate::core::util::row_bands::RowBand;

/// Builds one region per band so that, together, the regions show `view`
/// across a `width` x `height` image. Region `i` belongs to worker `i`.
#[must_use]
pub fn regions_for_view(
    width: u32,
    height: u32,
    bands: &[RowBand],
    view: &View,
    max_iters: u32,
) -> Vec<RegionDescriptor> {
    let left = view.centre.real - f64::from(width) / 2.0 / view.zoom;
    let top = view.centre.imag + f64::from(height) / 2.0 / view.zoom;

    bands
        .iter()
        .map(|band| RegionDescriptor {
            name: view.fractal.name().to_string(),
            width,
            height: band.rows,
            origin_x: left,
            origin_y: top - f64::from(band.top) / view.zoom,
            center_x: view.julia_constant.real,
            center_y: view.julia_constant.imag,
            zoom: view.zoom,
            max_iters,
            is_mandelbrot: view.fractal == FractalKind::Mandelbrot,
            image_offset: band.top as usize * width as usize,
        })
        .collect()
}

/// Checks that the regions are valid, lie inside the surface, never overlap
/// and leave no pixel unassigned.
pub fn check_layout(regions: &[RegionDescriptor], surface_len: usize) -> Result<(), LayoutError> {
    let mut spans = Vec::with_capacity(regions.len());

    for (index, region) in regions.iter().enumerate() {
        let worker_id = WorkerId::new(index as u32);
        region
            .validate()
            .map_err(|error| LayoutError::InvalidRegion { worker_id, error })?;

        let span = region
            .span()
            .map_err(|error| LayoutError::InvalidRegion { worker_id, error })?;

        if span.end > surface_len {
            return Err(LayoutError::OutOfBounds {
                worker_id,
                end: span.end,
                surface_len,
            });
        }

        spans.push((worker_id, span));
    }

    spans.sort_by_key(|(_, span)| span.start);

    let mut covered = 0;
    let mut previous: Option<WorkerId> = None;

    for (worker_id, span) in spans {
        if span.start < covered {
            return Err(LayoutError::Overlap {
                first: previous.unwrap_or(worker_id),
                second: worker_id,
            });
        }

        if span.start > covered {
            return Err(LayoutError::Gap {
                start: covered,
                end: span.start,
            });
        }

        covered = span.end;
        previous = Some(worker_id);
    }

    if covered < surface_len {
        return Err(LayoutError::Gap {
            start: covered,
            end: surface_len,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::util::row_bands::row_bands;

    fn create_view() -> View {
        View {
            fractal: FractalKind::Mandelbrot,
            centre: Complex::new(0.0, 0.0),
            zoom: 2.0,
            julia_constant: Complex::new(-0.7, 0.27),
        }
    }

    #[test]
    fn test_regions_partition_the_image() {
        let regions = regions_for_view(4, 6, &row_bands(3, 6), &create_view(), 50);

        assert_eq!(regions.len(), 3);
        assert_eq!(
            regions.iter().map(|r| r.image_offset).collect::<Vec<_>>(),
            vec![0, 8, 16]
        );
        assert_eq!(check_layout(&regions, 24), Ok(()));
    }

    #[test]
    fn test_bands_continue_the_same_plane() {
        let regions = regions_for_view(4, 4, &row_bands(2, 4), &create_view(), 50);

        // The first row of the second band sits one row below the last row
        // of the first band.
        let last_of_first = regions[0].pixel_to_plane(0, 1);
        let first_of_second = regions[1].pixel_to_plane(0, 0);

        assert_eq!(regions[0].origin_x, -1.0);
        assert_eq!(regions[0].origin_y, 1.0);
        assert_eq!(first_of_second.real, last_of_first.real);
        assert_eq!(first_of_second.imag, last_of_first.imag - 0.5);
    }

    #[test]
    fn test_julia_view_carries_constant() {
        let view = View {
            fractal: FractalKind::Julia,
            ..create_view()
        };

        let regions = regions_for_view(4, 2, &row_bands(1, 2), &view, 50);

        assert!(!regions[0].is_mandelbrot);
        assert_eq!(regions[0].name, "julia");
        assert_eq!(regions[0].julia_constant(), Complex::new(-0.7, 0.27));
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut regions = regions_for_view(4, 4, &row_bands(2, 4), &create_view(), 50);
        regions[1].image_offset = 4;
        regions[1].height = 3;

        assert_eq!(
            check_layout(&regions, 16),
            Err(LayoutError::Overlap {
                first: WorkerId::new(0),
                second: WorkerId::new(1)
            })
        );
    }

    #[test]
    fn test_gap_is_rejected() {
        let mut regions = regions_for_view(4, 4, &row_bands(2, 4), &create_view(), 50);
        regions[1].height = 1;

        assert_eq!(
            check_layout(&regions, 16),
            Err(LayoutError::Gap { start: 12, end: 16 })
        );
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut regions = regions_for_view(4, 4, &row_bands(2, 4), &create_view(), 50);
        regions[1].image_offset = 12;

        assert_eq!(
            check_layout(&regions, 16),
            Err(LayoutError::OutOfBounds {
                worker_id: WorkerId::new(1),
                end: 20,
                surface_len: 16
            })
        );
    }

    #[test]
    fn test_invalid_region_is_rejected() {
        let regions = regions_for_view(4, 4, &row_bands(1, 4), &create_view(), 0);

        assert!(matches!(
            check_layout(&regions, 16),
            Err(LayoutError::InvalidRegion { .. })
        ));
    }
}

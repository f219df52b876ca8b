use std::num::NonZeroU32;

/// A contiguous run of image rows owned by one worker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowBand {
    pub top: u32,
    pub rows: u32,
}

/// Every band needs at least one row, so there are never more bands than
/// rows.
#[must_use]
pub fn calculate_bands(max_bands: NonZeroU32, image_height: u32) -> u32 {
    max_bands.get().min(image_height)
}

#[must_use]
pub fn available_workers() -> NonZeroU32 {
    std::thread::available_parallelism()
        .ok()
        .and_then(|n| NonZeroU32::new(n.get() as u32))
        .unwrap_or(NonZeroU32::MIN)
}

/// Splits `image_height` rows into `bands` contiguous bands, top to bottom.
/// The last band takes any remainder rows.
#[must_use]
pub fn row_bands(bands: u32, image_height: u32) -> Vec<RowBand> {
    if bands == 0 || image_height == 0 {
        return Vec::new();
    }

    let band_height = image_height / bands;

    (0..bands)
        .map(|band_num| {
            let top = band_num * band_height;
            let rows = if band_num == bands - 1 {
                image_height - top
            } else {
                band_height
            };

            RowBand { top, rows }
        })
        .collect()
}

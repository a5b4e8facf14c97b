use haze_datatypes::raster::{AveragedGrid, BandRange, Grid2D, RawCube};
use snafu::ResultExt;

use crate::error;
use crate::util::Result;

/// Reduces the selected bands of `cube` to their per-cell arithmetic mean.
///
/// The band range is validated before any storage is allocated.
pub fn average_bands(cube: &RawCube, band_range: BandRange) -> Result<AveragedGrid> {
    let bands = band_range.resolve(cube.bands())?;

    let shape = cube.shape();
    let cells = shape.number_of_elements();

    let mut means = Vec::new();
    means
        .try_reserve_exact(cells)
        .context(error::CellAllocation { cells })?;
    means.resize(cells, 0.);

    for values in bands.clone().filter_map(|band| cube.band(band)) {
        for (mean, value) in means.iter_mut().zip(values) {
            *mean += value;
        }
    }

    let number_of_bands = bands.len() as f64;
    for mean in &mut means {
        *mean /= number_of_bands;
    }

    tracing::debug!(
        "averaged bands {}..{} of {} over {} cells",
        bands.start,
        bands.end,
        cube.bands(),
        cells
    );

    Ok(Grid2D::new(shape, means)?)
}

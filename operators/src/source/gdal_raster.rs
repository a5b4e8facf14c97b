use std::path::Path;

use gdal::{DatasetOptions, GdalOpenFlags};
use haze_datatypes::raster::{GdalGeoTransform, GeoTransform, GridShape2D, RasterData, RawCube};
use snafu::{OptionExt, ResultExt, ensure};

use crate::error;
use crate::util::Result;
use crate::util::gdal::{gdal_open_dataset_ex, spatial_reference_from_gdal};

/// Reads all bands of the raster at `path` into memory as `f64`.
///
/// The cube is band-sequential: band `b` occupies one row-major block of `rows × columns` values.
pub fn read_raster(path: &Path) -> Result<RasterData> {
    let dataset = gdal_open_dataset_ex(
        path,
        DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_RASTER,
            ..DatasetOptions::default()
        },
    )?;

    let bands = dataset.raster_count();
    ensure!(bands > 0, error::RasterWithoutBands { path });

    let spatial_ref = dataset
        .spatial_ref()
        .ok()
        .context(error::MissingSpatialReference { path })?;
    let spatial_reference = spatial_reference_from_gdal(&spatial_ref)?;

    let gdal_geo_transform: GdalGeoTransform = dataset.geo_transform()?;
    let geo_transform = GeoTransform::from(gdal_geo_transform);

    let (columns, rows) = dataset.raster_size();
    let shape = GridShape2D::new(rows, columns);

    let cells = shape
        .number_of_elements()
        .checked_mul(bands)
        .unwrap_or(usize::MAX);

    let mut data = Vec::new();
    data.try_reserve_exact(cells)
        .context(error::CellAllocation { cells })?;

    for band_index in 1..=bands {
        let band = dataset.rasterband(band_index)?;
        let buffer = band.read_as::<f64>((0, 0), (columns, rows), (columns, rows), None)?;
        let (_, values) = buffer.into_shape_and_vec();
        data.extend(values);
    }

    tracing::debug!(
        "read {} band(s) of {columns}×{rows} cells from {}",
        bands,
        path.display()
    );

    Ok(RasterData {
        name: path.display().to_string(),
        cube: RawCube::new(bands, shape, data)?,
        geo_transform,
        spatial_reference,
    })
}

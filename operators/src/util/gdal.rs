use std::path::Path;

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::vector::{Layer, LayerAccess};
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use haze_datatypes::spatial_reference::{CoordinateSystemKind, SpatialReference};
use snafu::{OptionExt, ResultExt};

use crate::error;
use crate::util::Result;

/// Opens a Gdal Dataset with the given `path`.
pub fn gdal_open_dataset(path: &Path) -> Result<Dataset> {
    gdal_open_dataset_ex(path, DatasetOptions::default())
}

/// Opens a Gdal Dataset with the given `path` and `dataset_options`.
pub fn gdal_open_dataset_ex(path: &Path, dataset_options: DatasetOptions) -> Result<Dataset> {
    #[cfg(debug_assertions)]
    let dataset_options = {
        let mut dataset_options = dataset_options;
        dataset_options.open_flags |= GdalOpenFlags::GDAL_OF_VERBOSE_ERROR;
        dataset_options
    };

    Dataset::open_ex(path, dataset_options).context(error::CouldNotOpenDataset { path })
}

/// Opens a vector dataset, leaving out raster drivers
pub fn gdal_open_vector_dataset(path: &Path) -> Result<Dataset> {
    gdal_open_dataset_ex(
        path,
        DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_VECTOR,
            ..DatasetOptions::default()
        },
    )
}

/// The layer called `layer_name`, or the first layer if no name is given
pub fn open_layer<'d>(
    dataset: &'d Dataset,
    path: &Path,
    layer_name: Option<&str>,
) -> Result<Layer<'d>> {
    match layer_name {
        Some(layer_name) => dataset
            .layer_by_name(layer_name)
            .context(error::LayerNotFound {
                path,
                layer: layer_name,
            }),
        None => dataset.layer(0).context(error::LayerNotFound {
            path,
            layer: "#0",
        }),
    }
}

/// Converts a GDAL spatial reference into its WKT and coordinate system kind
pub fn spatial_reference_from_gdal(spatial_ref: &SpatialRef) -> Result<SpatialReference> {
    let kind = if spatial_ref.is_geographic() {
        CoordinateSystemKind::Geographic
    } else if spatial_ref.is_projected() {
        CoordinateSystemKind::Projected
    } else {
        CoordinateSystemKind::Unknown
    };

    Ok(SpatialReference::new(spatial_ref.to_wkt()?, kind))
}

/// The coordinate reference system of a dataset.
///
/// Rasters report the dataset's CRS. For vector datasets, the CRS of `layer_name`
/// or of the first layer is used.
pub fn crs_of(path: &Path, layer_name: Option<&str>) -> Result<SpatialReference> {
    let dataset = gdal_open_dataset(path)?;

    let spatial_ref = if layer_name.is_none() && dataset.raster_count() > 0 {
        dataset
            .spatial_ref()
            .ok()
            .context(error::MissingSpatialReference { path })?
    } else {
        open_layer(&dataset, path, layer_name)?
            .spatial_ref()
            .context(error::MissingSpatialReference { path })?
    };

    spatial_reference_from_gdal(&spatial_ref)
}

/// A transformation from `source` to `target`, both interpreted with x as easting or longitude
pub fn coordinate_transform(
    source: &SpatialRef,
    target: &SpatialReference,
) -> Result<CoordTransform> {
    let mut source = source.clone();
    source.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let mut target = SpatialRef::from_wkt(target.wkt())?;
    target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    Ok(CoordTransform::new(&source, &target)?)
}

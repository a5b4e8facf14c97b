use snafu::Snafu;

use crate::primitives::Coordinate2D;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display(
        "Invalid bounding box: lower left coordinate {} must not be greater than upper right coordinate {}",
        lower_left_coordinate,
        upper_right_coordinate
    ))]
    InvalidBoundingBox {
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    },

    #[snafu(display(
        "Degenerate geo transform: pixel width {} and pixel height {} must both be non-zero",
        x_pixel_size,
        y_pixel_size
    ))]
    DegenerateGeoTransform {
        x_pixel_size: f64,
        y_pixel_size: f64,
    },

    #[snafu(display(
        "Band range out of bounds: offset {} with size {} does not fit into {} band(s)",
        offset,
        size,
        bands
    ))]
    BandRangeOutOfBounds {
        offset: usize,
        size: usize,
        bands: usize,
    },

    #[snafu(display(
        "Dimension capacity `{}` does not match data capacity `{}`",
        dimension_cap,
        data_cap
    ))]
    DimensionCapacityDoesNotMatchDataCapacity {
        dimension_cap: usize,
        data_cap: usize,
    },

    #[snafu(display("Polygon ring is not closed or has less than four coordinates"))]
    UnclosedPolygonRing,

    #[snafu(display("Polygon must have an exterior ring"))]
    MissingExteriorRing,

    #[snafu(display("Cannot derive a raster month from `{}`", name))]
    InvalidRasterMonth {
        name: String,
    },

    #[snafu(display("Spatial reference is neither geographic nor projected: {}", wkt))]
    UndeterminedAreaMode {
        wkt: String,
    },
}

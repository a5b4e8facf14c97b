mod band_range;
mod geo_transform;
mod grid;
mod raster_data;
mod raw_cube;

pub use self::band_range::BandRange;
pub use self::geo_transform::{GdalGeoTransform, GeoTransform};
pub use self::grid::{AveragedGrid, Grid2D, GridShape2D};
pub use self::raster_data::RasterData;
pub use self::raw_cube::RawCube;

mod gdal_raster;
mod ogr_polygons;

pub use self::gdal_raster::read_raster;
pub use self::ogr_polygons::load_polygons;

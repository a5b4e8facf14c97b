mod bounding_box;
mod coordinate;
mod feature;
mod polygon;
mod raster_month;

pub use bounding_box::BoundingBox2D;
pub use coordinate::Coordinate2D;
pub use feature::VectorFeature;
pub use polygon::Polygon;
pub use raster_month::RasterMonth;

mod environment;
mod geometry;

pub use environment::Environment;
pub use geometry::{GeoGeometryEngine, GeometryEngine};

use gdal::errors::CplErrType;

use super::{GeoGeometryEngine, GeometryEngine};

/// Process-wide setup for zonal statistics.
///
/// Create it once, before any dataset is opened, and pass it by reference.
#[derive(Debug)]
pub struct Environment {
    geometry_engine: Box<dyn GeometryEngine>,
}

impl Environment {
    /// Registers all GDAL drivers, routes GDAL's error output into `tracing`
    /// and uses the `geo` crate for geometry operations.
    pub fn new() -> Self {
        gdal::DriverManager::register_all();
        reroute_gdal_logging();

        Self::with_geometry_engine(Box::new(GeoGeometryEngine))
    }

    /// An environment with a custom geometry engine that leaves GDAL untouched
    pub fn with_geometry_engine(geometry_engine: Box<dyn GeometryEngine>) -> Self {
        Self { geometry_engine }
    }

    pub fn geometry_engine(&self) -> &dyn GeometryEngine {
        self.geometry_engine.as_ref()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// GDAL messages end up in the `GDAL` tracing target, tagged with their CPL error number
fn reroute_gdal_logging() {
    gdal::config::set_error_handler(|error_type, error_num, error_msg| {
        const LOG_TARGET: &str = "GDAL";
        match error_type {
            CplErrType::None | CplErrType::Debug => {
                tracing::debug!(target: LOG_TARGET, code = error_num, "{error_msg}");
            }
            CplErrType::Warning => {
                tracing::warn!(target: LOG_TARGET, code = error_num, "{error_msg}");
            }
            CplErrType::Failure | CplErrType::Fatal => {
                tracing::error!(target: LOG_TARGET, code = error_num, "{error_msg}");
            }
        }
    });
}

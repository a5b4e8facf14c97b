pub mod gdal;
mod zonal_mean_writer;

pub use zonal_mean_writer::ZonalMeanWriter;

use crate::error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

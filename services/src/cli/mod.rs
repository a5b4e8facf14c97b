pub mod selection;
mod zonal_means;

pub use selection::Selection;
pub use zonal_means::{ZonalMeans, compute_zonal_means};

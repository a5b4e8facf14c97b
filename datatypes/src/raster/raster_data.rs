use super::{GeoTransform, RawCube};
use crate::spatial_reference::{AreaMode, SpatialReference};
use crate::util::Result;

/// A fully loaded raster: its cell values, placement and coordinate reference system
#[derive(Clone, Debug)]
pub struct RasterData {
    /// Identifies the raster in messages, usually its file path
    pub name: String,
    pub cube: RawCube,
    pub geo_transform: GeoTransform,
    pub spatial_reference: SpatialReference,
}

impl RasterData {
    /// How areas are measured in the raster's CRS
    pub fn area_mode(&self) -> Result<AreaMode> {
        AreaMode::try_from(&self.spatial_reference)
    }
}

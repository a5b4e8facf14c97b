use haze_datatypes::primitives::Coordinate2D;
use haze_datatypes::spatial_reference::AreaMode;

use super::aggregator::{Aggregator, WeightedMeanAggregator};
use super::cell_index::{CellHandle, CellIndex};
use super::spatial_join::JoinResult;
use crate::engine::GeometryEngine;
use crate::error::Error;
use crate::util::Result;

/// The area-weighted mean of the cells overlapping one feature
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalMean {
    pub feature_id: u64,
    pub centroid: Coordinate2D,
    pub value: f64,
    /// Number of candidate cells that were evaluated successfully
    pub contributing_cells: usize,
    /// Sum of all cell weights, i.e. the share of the feature's area covered by the raster
    pub coverage: f64,
}

/// Computes [`ZonalMean`]s with one fixed [`AreaMode`]
#[derive(Debug, Clone, Copy)]
pub struct ZonalStatisticsCalculator<'e> {
    geometry_engine: &'e dyn GeometryEngine,
    area_mode: AreaMode,
}

impl<'e> ZonalStatisticsCalculator<'e> {
    pub fn new(geometry_engine: &'e dyn GeometryEngine, area_mode: AreaMode) -> Self {
        Self {
            geometry_engine,
            area_mode,
        }
    }

    pub fn area_mode(&self) -> AreaMode {
        self.area_mode
    }

    /// Computes the weighted mean of a joined feature.
    ///
    /// Cells whose intersection cannot be computed are skipped and reported in `diagnostics`.
    /// Returns `Ok(None)` if there are no candidates or no candidate could be evaluated, and an
    /// error if the feature's own area or centroid cannot be computed.
    pub fn calculate(
        &self,
        index: &CellIndex,
        join: &JoinResult<'_>,
        diagnostics: &mut Vec<Error>,
    ) -> Result<Option<ZonalMean>> {
        if join.is_empty() {
            return Ok(None);
        }

        let feature_id = join.feature.id();
        let polygon = join.feature.polygon();

        let feature_area = self
            .geometry_engine
            .polygon_area(polygon, self.area_mode)
            .map_err(|error| Error::FeatureArea {
                feature_id,
                reason: error.to_string(),
            })?;

        if feature_area <= 0. {
            return Err(Error::FeatureArea {
                feature_id,
                reason: "feature has no area".to_string(),
            });
        }

        let mut aggregator = WeightedMeanAggregator::new();

        for &handle in &join.candidates {
            let cell = index.cell(handle);

            match self.intersection_area(join, handle, index) {
                Ok(area) => aggregator.add_value(cell.value, area / feature_area),
                Err(error) => {
                    tracing::warn!("skipping cell: {error}");
                    diagnostics.push(Error::CellIntersection {
                        feature_id,
                        column: cell.column,
                        row: cell.row,
                        reason: error.to_string(),
                    });
                }
            }
        }

        let Some(value) = aggregator.result() else {
            return Ok(None);
        };

        let centroid = self
            .geometry_engine
            .centroid(polygon)
            .map_err(|error| Error::FeatureCentroid {
                feature_id,
                reason: error.to_string(),
            })?;

        Ok(Some(ZonalMean {
            feature_id,
            centroid,
            value,
            contributing_cells: aggregator.count(),
            coverage: aggregator.sum_weights(),
        }))
    }

    fn intersection_area(
        &self,
        join: &JoinResult<'_>,
        handle: CellHandle,
        index: &CellIndex,
    ) -> Result<f64> {
        let intersection = self
            .geometry_engine
            .intersection(join.feature.polygon(), &index.cell(handle).bounds)?;

        match intersection {
            Some(intersection) => self.geometry_engine.area(&intersection, self.area_mode),
            None => Ok(0.),
        }
    }
}

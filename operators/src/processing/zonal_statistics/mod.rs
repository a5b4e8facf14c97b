mod aggregator;
mod band_aggregation;
mod calculator;
mod cell_index;
mod periods;
mod spatial_join;

pub use aggregator::{Aggregator, WeightedMeanAggregator};
pub use band_aggregation::average_bands;
pub use calculator::{ZonalMean, ZonalStatisticsCalculator};
pub use cell_index::{CellHandle, CellIndex, CellRecord, TREE_NODE_CAPACITY};
pub use periods::{
    Period, PeriodSelector, process_period, process_period_list, process_periods,
};
pub use spatial_join::{JoinResult, join_feature, join_features};

use haze_datatypes::primitives::VectorFeature;
use haze_datatypes::raster::{BandRange, RasterData};

use crate::engine::Environment;
use crate::error::Error;
use crate::util::Result;

/// The outcome of one zonal statistics pass over a raster
#[derive(Debug, Default)]
pub struct ZonalStatisticsRound {
    /// One entry per feature that overlaps the raster, in feature order
    pub means: Vec<ZonalMean>,
    /// Cells and features that were skipped, with the reason
    pub diagnostics: Vec<Error>,
}

/// Computes the area-weighted mean of the bands in `band_range` for every feature.
///
/// Features are expected in the raster's coordinate reference system.
/// Errors concerning the raster as a whole are returned, while failures of single
/// features or cells only end up in the round's diagnostics.
pub fn compute_zonal_statistics(
    environment: &Environment,
    raster: &RasterData,
    features: &[VectorFeature],
    band_range: BandRange,
) -> Result<ZonalStatisticsRound> {
    let area_mode = raster.area_mode()?;
    let grid = average_bands(&raster.cube, band_range)?;
    let index = CellIndex::build(&grid, &raster.geo_transform)?;

    let calculator = ZonalStatisticsCalculator::new(environment.geometry_engine(), area_mode);

    let mut round = ZonalStatisticsRound::default();

    for join in join_features(&index, features) {
        match calculator.calculate(&index, &join, &mut round.diagnostics) {
            Ok(Some(mean)) => round.means.push(mean),
            Ok(None) => {
                tracing::trace!("feature {} does not overlap {}", join.feature.id(), raster.name);
            }
            Err(error) => {
                tracing::warn!("skipping feature {}: {error}", join.feature.id());
                round.diagnostics.push(error);
            }
        }
    }

    tracing::debug!(
        "computed {} mean(s) for {} feature(s) of {} with {} diagnostic(s)",
        round.means.len(),
        features.len(),
        raster.name,
        round.diagnostics.len()
    );

    Ok(round)
}

use haze_datatypes::primitives::{RasterMonth, VectorFeature};
use haze_datatypes::raster::{BandRange, RasterData};
use snafu::ensure;

use super::{ZonalStatisticsRound, compute_zonal_statistics};
use crate::engine::Environment;
use crate::error;
use crate::util::Result;

/// How the bands of a raster are split into periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelector {
    /// The raster covers a single period, e.g. a daily file with the requested hours
    WholeRaster,
    /// The raster covers a calendar month with `bands_per_day` consecutive bands per day,
    /// starting with the first day of the month
    Daily { bands_per_day: usize },
}

/// A slice of a raster's bands that is averaged into one result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Day of month, `None` for [`PeriodSelector::WholeRaster`]
    pub day: Option<u32>,
    pub band_range: BandRange,
}

impl PeriodSelector {
    /// Lists the periods of `raster` in order.
    ///
    /// Daily periods end with the last day of `month`. If the raster holds fewer
    /// bands than the month needs, the list ends with the last complete day.
    pub fn periods(&self, raster: &RasterData, month: RasterMonth) -> Result<Vec<Period>> {
        let bands_per_day = match *self {
            PeriodSelector::WholeRaster => {
                return Ok(vec![Period {
                    day: None,
                    band_range: BandRange::all(),
                }]);
            }
            PeriodSelector::Daily { bands_per_day } => bands_per_day,
        };

        let bands = raster.cube.bands();

        ensure!(
            bands_per_day > 0 && bands >= bands_per_day,
            error::InsufficientBandsPerDay {
                raster: raster.name.clone(),
                bands,
                bands_per_day,
            }
        );

        let mut periods = Vec::new();

        for day in 1..=month.days_in_month() {
            let offset = (day as usize - 1) * bands_per_day;

            if offset + bands_per_day > bands {
                tracing::warn!(
                    "{} ends after day {} of {month}, {} band(s) left over",
                    raster.name,
                    day - 1,
                    bands - offset.min(bands)
                );
                break;
            }

            periods.push(Period {
                day: Some(day),
                band_range: BandRange::new(offset, bands_per_day),
            });
        }

        Ok(periods)
    }
}

/// Computes the zonal statistics of a single period
pub fn process_period(
    environment: &Environment,
    raster: &RasterData,
    features: &[VectorFeature],
    period: &Period,
) -> Result<ZonalStatisticsRound> {
    compute_zonal_statistics(environment, raster, features, period.band_range)
}

/// Processes all periods of `raster` in sequence and hands each completed round to `sink`.
///
/// A period that fails with an error that does not halt the run is logged and skipped.
/// Errors of `sink` are returned immediately.
pub fn process_periods<S>(
    environment: &Environment,
    raster: &RasterData,
    features: &[VectorFeature],
    selector: PeriodSelector,
    month: RasterMonth,
    sink: S,
) -> Result<()>
where
    S: FnMut(&Period, ZonalStatisticsRound) -> Result<()>,
{
    let periods = selector.periods(raster, month)?;
    process_period_list(environment, raster, features, &periods, month, sink)
}

/// Like [`process_periods`], but only for `periods`, e.g. a subset of [`PeriodSelector::periods`]
pub fn process_period_list<S>(
    environment: &Environment,
    raster: &RasterData,
    features: &[VectorFeature],
    periods: &[Period],
    month: RasterMonth,
    mut sink: S,
) -> Result<()>
where
    S: FnMut(&Period, ZonalStatisticsRound) -> Result<()>,
{
    for period in periods {
        match process_period(environment, raster, features, period) {
            Ok(round) => {
                tracing::info!(
                    "{} {}: {} mean(s)",
                    raster.name,
                    period_label(period, month),
                    round.means.len()
                );
                sink(period, round)?;
            }
            Err(error) if error.halts_run() => return Err(error),
            Err(error) => {
                tracing::warn!(
                    "skipping {} {}: {error}",
                    raster.name,
                    period_label(period, month)
                );
            }
        }
    }

    Ok(())
}

fn period_label(period: &Period, month: RasterMonth) -> String {
    match period.day.and_then(|day| month.date(day)) {
        Some(date) => date.to_string(),
        None => month.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GeoGeometryEngine;
    use crate::error::Error;
    use approx::assert_relative_eq;
    use haze_datatypes::primitives::Polygon;
    use haze_datatypes::raster::{GeoTransform, GridShape2D, RawCube};
    use haze_datatypes::spatial_reference::{CoordinateSystemKind, SpatialReference};

    /// A single-cell raster whose band `b` has the value `b`
    fn single_cell_raster(bands: usize) -> RasterData {
        RasterData {
            name: "2024-02.grib".to_string(),
            cube: RawCube::new(
                bands,
                GridShape2D::new(1, 1),
                (0..bands).map(|band| band as f64).collect(),
            )
            .unwrap(),
            geo_transform: GeoTransform::new((0., 1.).into(), 1., -1.),
            spatial_reference: SpatialReference::new(
                "LOCAL_CS[\"test\"]".to_string(),
                CoordinateSystemKind::Projected,
            ),
        }
    }

    fn unit_square() -> VectorFeature {
        VectorFeature::new(
            1,
            Polygon::new(vec![vec![
                (0., 0.).into(),
                (1., 0.).into(),
                (1., 1.).into(),
                (0., 1.).into(),
                (0., 0.).into(),
            ]])
            .unwrap(),
        )
    }

    #[test]
    fn whole_raster_is_one_period() {
        let raster = single_cell_raster(3);

        let periods = PeriodSelector::WholeRaster
            .periods(&raster, RasterMonth::new(2024, 2).unwrap())
            .unwrap();

        assert_eq!(
            periods,
            vec![Period {
                day: None,
                band_range: BandRange::all()
            }]
        );
    }

    #[test]
    fn daily_periods_end_with_leap_day() {
        let raster = single_cell_raster(24 * 31);

        let periods = PeriodSelector::Daily { bands_per_day: 24 }
            .periods(&raster, RasterMonth::new(2024, 2).unwrap())
            .unwrap();

        assert_eq!(periods.len(), 29);
        assert_eq!(periods[0].band_range, BandRange::new(0, 24));
        assert_eq!(
            periods[28],
            Period {
                day: Some(29),
                band_range: BandRange::new(28 * 24, 24)
            }
        );
    }

    #[test]
    fn daily_periods_in_common_year() {
        let raster = single_cell_raster(2 * 31);

        let periods = PeriodSelector::Daily { bands_per_day: 2 }
            .periods(&raster, RasterMonth::new(2023, 2).unwrap())
            .unwrap();

        assert_eq!(periods.len(), 28);
    }

    #[test]
    fn partial_month_ends_with_last_complete_day() {
        let raster = single_cell_raster(7);

        let periods = PeriodSelector::Daily { bands_per_day: 2 }
            .periods(&raster, RasterMonth::new(2024, 1).unwrap())
            .unwrap();

        assert_eq!(
            periods.iter().map(|period| period.day).collect::<Vec<_>>(),
            vec![Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn too_few_bands_for_a_day() {
        let raster = single_cell_raster(3);

        let error = PeriodSelector::Daily { bands_per_day: 4 }
            .periods(&raster, RasterMonth::new(2024, 1).unwrap())
            .unwrap_err();

        assert!(matches!(
            error,
            Error::InsufficientBandsPerDay {
                bands: 3,
                bands_per_day: 4,
                ..
            }
        ));
        assert!(error.halts_run());
    }

    #[test]
    fn zero_bands_per_day() {
        let raster = single_cell_raster(3);

        assert!(
            PeriodSelector::Daily { bands_per_day: 0 }
                .periods(&raster, RasterMonth::new(2024, 1).unwrap())
                .is_err()
        );
    }

    #[test]
    fn process_daily_periods_in_sequence() {
        let environment = Environment::with_geometry_engine(Box::new(GeoGeometryEngine));
        let raster = single_cell_raster(29 * 2);
        let features = vec![unit_square()];

        let mut results = Vec::new();
        process_periods(
            &environment,
            &raster,
            &features,
            PeriodSelector::Daily { bands_per_day: 2 },
            RasterMonth::new(2024, 2).unwrap(),
            |period, round| {
                results.push((period.day, round.means[0].value));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(results.len(), 29);
        assert_eq!(results[0].0, Some(1));
        assert_relative_eq!(results[0].1, 0.5);
        assert_eq!(results[28].0, Some(29));
        assert_relative_eq!(results[28].1, 56.5);
    }

    #[test]
    fn sink_errors_stop_processing() {
        let environment = Environment::with_geometry_engine(Box::new(GeoGeometryEngine));
        let raster = single_cell_raster(4);
        let features = vec![unit_square()];

        let mut calls = 0;
        let result = process_periods(
            &environment,
            &raster,
            &features,
            PeriodSelector::Daily { bands_per_day: 1 },
            RasterMonth::new(2024, 2).unwrap(),
            |_, _| {
                calls += 1;
                Err(Error::Io {
                    source: std::io::Error::other("disk full"),
                })
            },
        );

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn process_selected_days_only() {
        let environment = Environment::with_geometry_engine(Box::new(GeoGeometryEngine));
        let raster = single_cell_raster(29);
        let features = vec![unit_square()];
        let month = RasterMonth::new(2024, 2).unwrap();

        let periods: Vec<Period> = PeriodSelector::Daily { bands_per_day: 1 }
            .periods(&raster, month)
            .unwrap()
            .into_iter()
            .filter(|period| matches!(period.day, Some(3 | 29)))
            .collect();

        let mut results = Vec::new();
        process_period_list(
            &environment,
            &raster,
            &features,
            &periods,
            month,
            |period, round| {
                results.push((period.day, round.means[0].value));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            results.iter().map(|(day, _)| *day).collect::<Vec<_>>(),
            vec![Some(3), Some(29)]
        );
        assert_relative_eq!(results[0].1, 2.);
        assert_relative_eq!(results[1].1, 28.);
    }

    #[test]
    fn whole_raster_period_averages_all_bands() {
        let environment = Environment::with_geometry_engine(Box::new(GeoGeometryEngine));
        let raster = single_cell_raster(4);
        let features = vec![unit_square()];

        let round = process_period(
            &environment,
            &raster,
            &features,
            &Period {
                day: None,
                band_range: BandRange::all(),
            },
        )
        .unwrap();

        assert_relative_eq!(round.means[0].value, 1.5);
    }
}

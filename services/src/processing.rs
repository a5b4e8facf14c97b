use chrono::NaiveDate;
use haze_datatypes::primitives::RasterMonth;
use haze_operators::engine::Environment;
use haze_operators::processing::{Period, PeriodSelector, process_period_list};
use haze_operators::source::{load_polygons, read_raster};
use haze_operators::util::ZonalMeanWriter;
use snafu::ResultExt;
use std::path::{Path, PathBuf};

use crate::cli::Selection;
use crate::config::Processing;
use crate::error::{self, Result};

/// What to compute: the requested dates and hours, the AOI and where to put the results
#[derive(Debug, Clone)]
pub struct Request {
    pub years: Selection,
    pub months: Selection,
    pub days: Selection,
    pub hours: Selection,
    pub aoi: PathBuf,
    pub output_directory: PathBuf,
}

/// Counts of a finished run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rasters_processed: usize,
    pub rasters_skipped: usize,
    pub files_written: usize,
    /// Features and cells that were left out of the results
    pub diagnostics: usize,
}

/// Computes the zonal means of all requested days and writes one file per day.
///
/// A monthly raster `YYYY-MM.<ext>` is preferred, with one band per requested hour and day.
/// Otherwise the daily rasters `YYYY-MM-DD.<ext>` are used as a whole. Missing rasters are skipped.
pub fn run(
    environment: &Environment,
    request: &Request,
    settings: &Processing,
) -> Result<RunSummary> {
    std::fs::create_dir_all(&request.output_directory).context(
        error::CreateOutputDirectory {
            path: &request.output_directory,
        },
    )?;

    let mut context = RunContext {
        environment,
        request,
        settings,
        summary: RunSummary::default(),
    };

    for &year in request.years.values() {
        for &month in request.months.values() {
            let month = RasterMonth::new(year as i32, month)?;
            context.process_month(month)?;
        }
    }

    tracing::info!(
        "processed {} raster(s), skipped {}, wrote {} file(s) with {} diagnostic(s)",
        context.summary.rasters_processed,
        context.summary.rasters_skipped,
        context.summary.files_written,
        context.summary.diagnostics
    );

    Ok(context.summary)
}

struct RunContext<'a> {
    environment: &'a Environment,
    request: &'a Request,
    settings: &'a Processing,
    summary: RunSummary,
}

impl RunContext<'_> {
    fn process_month(&mut self, month: RasterMonth) -> Result<()> {
        let monthly_raster = self.raster_path(&month.to_string());

        if monthly_raster.exists() {
            let selector = PeriodSelector::Daily {
                bands_per_day: self.request.hours.len(),
            };
            let request = self.request;

            return self.process_raster(&monthly_raster, selector, |period| {
                period
                    .day
                    .filter(|&day| request.days.contains(day))
                    .and_then(|day| month.date(day))
            });
        }

        for &day in self.request.days.values() {
            let Some(date) = month.date(day) else {
                tracing::debug!("{month} has no day {day}");
                continue;
            };

            let daily_raster = self.raster_path(&date.to_string());

            if !daily_raster.exists() {
                tracing::warn!("{} does not exist, skipping", daily_raster.display());
                self.summary.rasters_skipped += 1;
                continue;
            }

            self.process_raster(&daily_raster, PeriodSelector::WholeRaster, |_| Some(date))?;
        }

        Ok(())
    }

    /// Processes the periods of one raster that `output_date` maps to a date and writes their results
    fn process_raster<F>(
        &mut self,
        path: &Path,
        selector: PeriodSelector,
        output_date: F,
    ) -> Result<()>
    where
        F: Fn(&Period) -> Option<NaiveDate>,
    {
        tracing::info!("processing {}", path.display());

        match self.try_process_raster(path, selector, output_date) {
            Ok(()) => {
                self.summary.rasters_processed += 1;
                Ok(())
            }
            Err(error) if error.halts_run() => Err(error.into()),
            Err(error) => {
                tracing::warn!("skipping {}: {error}", path.display());
                self.summary.rasters_skipped += 1;
                Ok(())
            }
        }
    }

    fn try_process_raster<F>(
        &mut self,
        path: &Path,
        selector: PeriodSelector,
        output_date: F,
    ) -> haze_operators::util::Result<()>
    where
        F: Fn(&Period) -> Option<NaiveDate>,
    {
        let raster = read_raster(path)?;
        let month = RasterMonth::from_file_name(path)?;
        let features = load_polygons(
            &self.request.aoi,
            self.settings.aoi_layer.as_deref(),
            &raster.spatial_reference,
        )?;

        let selected: Vec<Period> = selector
            .periods(&raster, month)?
            .into_iter()
            .filter(|period| output_date(period).is_some())
            .collect();

        let output_directory = &self.request.output_directory;
        let settings = self.settings;
        let summary = &mut self.summary;

        process_period_list(
            self.environment,
            &raster,
            &features,
            &selected,
            month,
            |period, round| {
                summary.diagnostics += round.diagnostics.len();

                let Some(date) = output_date(period) else {
                    return Ok(());
                };

                let output =
                    output_directory.join(format!("{date}.{}", settings.output_extension));
                let mut writer =
                    ZonalMeanWriter::create(&output, settings.dataset_tag.as_str())?;
                writer.write_means(&round.means)?;
                writer.finish()?;

                tracing::debug!("wrote {} mean(s) to {}", round.means.len(), output.display());
                summary.files_written += 1;

                Ok(())
            },
        )
    }

    fn raster_path(&self, stem: &str) -> PathBuf {
        self.settings
            .raster_directory
            .join(format!("{stem}.{}", self.settings.raster_extension))
    }
}

use clap::Parser;
use haze_operators::engine::Environment;
use std::path::PathBuf;

use super::selection::{Selection, parse_days, parse_hours, parse_months, parse_years};
use crate::config::{self, get_config_element};
use crate::processing::{Request, run};

/// Area-weighted means of ERA5 single level rasters for the polygons of an AOI.
///
/// Selections are given as inclusive `start:stop` ranges, comma-separated lists or single values.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct ZonalMeans {
    /// Years to process (1940-2039)
    #[arg(long, value_parser = parse_years)]
    pub year: Selection,

    /// Months to process (1-12)
    #[arg(long, value_parser = parse_months)]
    pub month: Selection,

    /// Days to process (1-31)
    #[arg(long, value_parser = parse_days)]
    pub day: Selection,

    /// Hours contained in the rasters (0-23)
    #[arg(long, value_parser = parse_hours)]
    pub hour: Selection,

    /// OGR-readable file with one or more polygons
    pub aoi: PathBuf,

    /// Directory into which the daily output files are written
    pub outdir: PathBuf,

    /// Directory with the input rasters, overrides `processing.raster_directory`
    #[arg(long)]
    pub raster_dir: Option<PathBuf>,

    /// Layer of the AOI file, overrides `processing.aoi_layer`
    #[arg(long)]
    pub layer: Option<String>,
}

/// Computes and writes the zonal means of all requested days
pub fn compute_zonal_means(params: ZonalMeans) -> Result<(), anyhow::Error> {
    let mut settings: config::Processing = get_config_element()?;

    if let Some(raster_dir) = params.raster_dir {
        settings.raster_directory = raster_dir;
    }
    if params.layer.is_some() {
        settings.aoi_layer = params.layer;
    }

    let request = Request {
        years: params.year,
        months: params.month,
        days: params.day,
        hours: params.hour,
        aoi: params.aoi,
        output_directory: params.outdir,
    };

    tracing::info!(
        "computing means for years {}, months {}, days {}, hours {}",
        request.years,
        request.months,
        request.days,
        request.hours
    );

    let environment = Environment::new();
    run(&environment, &request, &settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arguments() {
        let params = ZonalMeans::try_parse_from([
            "haze",
            "--year",
            "2020:2021",
            "--month",
            "1,7",
            "--day",
            "15",
            "--hour",
            "0:23",
            "aoi.gpkg",
            "out",
            "--layer",
            "regions",
        ])
        .unwrap();

        assert_eq!(params.year.values(), &[2020, 2021]);
        assert_eq!(params.month.values(), &[1, 7]);
        assert_eq!(params.day.values(), &[15]);
        assert_eq!(params.hour.len(), 24);
        assert_eq!(params.aoi, PathBuf::from("aoi.gpkg"));
        assert_eq!(params.layer.as_deref(), Some("regions"));
        assert_eq!(params.raster_dir, None);
    }

    #[test]
    fn rejects_invalid_selection() {
        let result = ZonalMeans::try_parse_from([
            "haze", "--year", "1900", "--month", "1", "--day", "1", "--hour", "0", "aoi", "out",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn requires_positional_arguments() {
        let result = ZonalMeans::try_parse_from([
            "haze", "--year", "2000", "--month", "1", "--day", "1", "--hour", "0", "aoi",
        ]);

        assert!(result.is_err());
    }
}

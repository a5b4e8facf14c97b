use haze_datatypes::error::Error as DataTypeError;
use snafu::Snafu;
use std::collections::TryReserveError;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataType error: {source}"))]
    DataType {
        source: DataTypeError,
    },

    #[snafu(display("Gdal error: {source}"))]
    Gdal {
        source: gdal::errors::GdalError,
    },

    #[snafu(display("Could not open dataset `{}`: {source}", path.display()))]
    CouldNotOpenDataset {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },

    #[snafu(display("Layer `{layer}` not found in dataset `{}`", path.display()))]
    LayerNotFound {
        path: PathBuf,
        layer: String,
        source: gdal::errors::GdalError,
    },

    #[snafu(display("Dataset `{}` has no spatial reference", path.display()))]
    MissingSpatialReference {
        path: PathBuf,
    },

    #[snafu(display("Raster `{}` has no bands", path.display()))]
    RasterWithoutBands {
        path: PathBuf,
    },

    #[snafu(display("Could not reserve storage for {cells} raster cells: {source}"))]
    CellAllocation {
        cells: usize,
        source: TryReserveError,
    },

    #[snafu(display("Intersection of feature {feature_id} with cell ({column}, {row}) failed: {reason}"))]
    CellIntersection {
        feature_id: u64,
        column: usize,
        row: usize,
        reason: String,
    },

    #[snafu(display("Area of feature {feature_id} could not be computed: {reason}"))]
    FeatureArea {
        feature_id: u64,
        reason: String,
    },

    #[snafu(display("Centroid of feature {feature_id} could not be computed: {reason}"))]
    FeatureCentroid {
        feature_id: u64,
        reason: String,
    },

    #[snafu(display("Geometry operation failed: {reason}"))]
    Geometry {
        reason: String,
    },

    #[snafu(display("Raster `{raster}` has {bands} band(s), which is not enough for {bands_per_day} band(s) per day"))]
    InsufficientBandsPerDay {
        raster: String,
        bands: usize,
        bands_per_day: usize,
    },

    #[snafu(display("Could not write results: {source}"))]
    Io {
        source: std::io::Error,
    },

    #[snafu(display("Could not write result record: {source}"))]
    CsvWriter {
        source: csv::Error,
    },
}

impl Error {
    /// Configuration and resource errors stop the whole run, all others only the current unit of work
    pub fn halts_run(&self) -> bool {
        match self {
            Error::DataType { source } => matches!(
                source,
                DataTypeError::DegenerateGeoTransform { .. }
                    | DataTypeError::BandRangeOutOfBounds { .. }
                    | DataTypeError::UndeterminedAreaMode { .. }
                    | DataTypeError::InvalidRasterMonth { .. }
            ),
            Error::CellAllocation { .. } | Error::InsufficientBandsPerDay { .. } => true,
            _ => false,
        }
    }
}

impl From<DataTypeError> for Error {
    fn from(datatype_error: DataTypeError) -> Self {
        Self::DataType {
            source: datatype_error,
        }
    }
}

impl From<gdal::errors::GdalError> for Error {
    fn from(gdal_error: gdal::errors::GdalError) -> Self {
        Self::Gdal { source: gdal_error }
    }
}

impl From<csv::Error> for Error {
    fn from(csv_error: csv::Error) -> Self {
        Self::CsvWriter { source: csv_error }
    }
}

impl From<std::io::Error> for Error {
    fn from(io_error: std::io::Error) -> Self {
        Self::Io { source: io_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_halt_the_run() {
        let degenerate: Error = DataTypeError::DegenerateGeoTransform {
            x_pixel_size: 0.,
            y_pixel_size: -1.,
        }
        .into();
        let out_of_bounds: Error = DataTypeError::BandRangeOutOfBounds {
            offset: 4,
            size: 1,
            bands: 4,
        }
        .into();

        assert!(degenerate.halts_run());
        assert!(out_of_bounds.halts_run());
    }

    #[test]
    fn local_errors_do_not_halt_the_run() {
        let cell = Error::CellIntersection {
            feature_id: 1,
            column: 0,
            row: 0,
            reason: "invalid ring".to_string(),
        };
        let feature = Error::FeatureArea {
            feature_id: 1,
            reason: "not finite".to_string(),
        };
        let missing = Error::MissingSpatialReference {
            path: PathBuf::from("aoi.shp"),
        };

        assert!(!cell.halts_run());
        assert!(!feature.halts_run());
        assert!(!missing.halts_run());
    }
}

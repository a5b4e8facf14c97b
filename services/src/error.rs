use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataType error: {source}"))]
    DataType {
        source: haze_datatypes::error::Error,
    },

    #[snafu(display("Operator error: {source}"))]
    Operator {
        source: haze_operators::error::Error,
    },

    #[snafu(display("Could not lock the configuration"))]
    ConfigLockFailed,

    #[snafu(display("Invalid configuration: {source}"))]
    Config {
        source: config::ConfigError,
    },

    #[snafu(display("Could not determine the working directory: {source}"))]
    MissingWorkingDirectory {
        source: std::io::Error,
    },

    #[snafu(display("No directory with `Settings-default.toml` found"))]
    MissingSettingsDirectory,

    #[snafu(display("Invalid {name} selection `{input}`: {reason}"))]
    InvalidSelection {
        name: &'static str,
        input: String,
        reason: String,
    },

    #[snafu(display("Could not create output directory `{}`: {source}", path.display()))]
    CreateOutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<haze_datatypes::error::Error> for Error {
    fn from(e: haze_datatypes::error::Error) -> Self {
        Self::DataType { source: e }
    }
}

impl From<haze_operators::error::Error> for Error {
    fn from(e: haze_operators::error::Error) -> Self {
        Self::Operator { source: e }
    }
}

use clap::Parser;
use haze_services::cli::{ZonalMeans, compute_zonal_means};
use haze_services::config::{self, get_config_element};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn init_logging() -> Result<(), anyhow::Error> {
    let logging_config: config::Logging = get_config_element()?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_new(&logging_config.log_spec)?);

    tracing_subscriber::registry().with(console_layer).init();

    Ok(())
}

#[allow(clippy::print_stderr)]
fn main() {
    let params = ZonalMeans::parse();

    if let Err(err) = init_logging().and_then(|()| compute_zonal_means(params)) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

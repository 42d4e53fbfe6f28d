//! pkgcloud CLI entrypoint for reading packagecloud repositories.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pkgcloud::{ClientError, PkgcloudConfig};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ClientError> {
    let config = load_config()?;
    init_tracing(config.verbose);
    cli::run(&config)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PkgcloudConfig, ClientError> {
    PkgcloudConfig::load().map_err(|error| ClientError::Configuration {
        message: error.to_string(),
    })
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` overrides the default level, which is `warn`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

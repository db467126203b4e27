use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|error| CliError::Logging(error.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}

use std::fs;
use std::path::Path;

use sss_core::StockConfig;
use tracing::debug;

use crate::error::CliError;

/// Stocks loaded when no list is given on the command line.
pub fn sample_stocks() -> Vec<StockConfig> {
    vec![
        StockConfig::common("TEA", 0.0, 100.0),
        StockConfig::common("POP", 8.0, 100.0),
        StockConfig::common("ALE", 23.0, 60.0),
        StockConfig::preferred("GIN", 8.0, 2.0, 100.0),
        StockConfig::common("JOE", 13.0, 250.0),
    ]
}

/// Read the stock list from `path`, or fall back to [`sample_stocks`].
///
/// `decay_seconds` replaces the window of every entry when given.
pub fn load(path: Option<&Path>, decay_seconds: Option<f64>) -> Result<Vec<StockConfig>, CliError> {
    let configs = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| CliError::SeedRead {
                path: path.to_path_buf(),
                source,
            })?;
            let configs: Vec<StockConfig> =
                serde_json::from_str(&raw).map_err(|source| CliError::SeedParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(path = %path.display(), count = configs.len(), "read stock list");
            configs
        }
        None => sample_stocks(),
    };

    Ok(match decay_seconds {
        Some(seconds) => configs
            .into_iter()
            .map(|config| config.with_decay_seconds(seconds))
            .collect(),
        None => configs,
    })
}

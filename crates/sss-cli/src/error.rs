use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Stock(#[from] sss_core::StockError),

    #[error("cannot read stock list {}: {source}", .path.display())]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse stock list {}: {source}", .path.display())]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Stock(_) => 2,
            Self::SeedRead { .. } => 3,
            Self::SeedParse { .. } => 4,
            Self::Serialization(_) => 4,
            Self::Logging(_) => 6,
            Self::Io(_) => 10,
        }
    }
}

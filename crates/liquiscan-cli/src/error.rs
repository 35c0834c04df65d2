use thiserror::Error;

use crate::catalog::CatalogError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] liquiscan_core::ValidationError),

    #[error(transparent)]
    Config(#[from] liquiscan_core::ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid date '{value}': expected ISO format like 2024-01-31")]
    InvalidDate { value: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 2,
            Self::InvalidDate { .. } => 2,
            Self::Catalog(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

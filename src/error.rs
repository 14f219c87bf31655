//! Recipe error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, populating or releasing a recipe session.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("failed to open recipe '{configuration}' at {}", root.display())]
    AcquisitionFailed {
        configuration: String,
        root: PathBuf,
        #[source]
        source: Box<RecipeError>,
    },

    #[error("recipe context is not usable: {0}")]
    Unusable(String),

    #[error(
        "invalid configuration name '{0}': only alphanumerics, '_' and '-' are allowed"
    )]
    InvalidConfiguration(String),

    #[error(
        "invalid dependency name '{0}': only alphanumerics, '_', '-', '+' and '.' are allowed"
    )]
    InvalidDependencyName(String),

    #[error("recipe '{configuration}' is already open in another process. If this is incorrect, delete '{}'", lock.display())]
    Locked {
        configuration: String,
        lock: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize requirements: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to parse requirements: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;

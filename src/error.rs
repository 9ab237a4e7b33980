//! Error types for the tracker, the mission loop and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::mission::VehicleCommand;

/// Configuration errors. Always fatal: the mission loop never starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("vocabulary `{0}` is empty")]
    EmptyVocabulary(&'static str),
}

/// A raw detection that cannot be turned into an observation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    #[error("detection {index} has {found} corners, expected 4")]
    CornerCount { index: usize, found: usize },

    #[error("detection {index} has a non-finite corner coordinate")]
    NonFiniteCorner { index: usize },
}

/// Failure of a single tick that ends the mission loop.
///
/// Frame and detector problems never surface here: they skip the tick or degrade it
/// to an empty detection set.
#[derive(Error, Debug)]
pub enum TickError {
    #[error("vehicle rejected command {command}: {reason}")]
    CommandDispatch {
        command: VehicleCommand,
        reason: String,
    },
}

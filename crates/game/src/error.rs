//! Errors raised at the edges of the simulation (catalog validation, score storage).

use std::path::PathBuf;
use thiserror::Error;

/// A character or target catalog failed validation.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,
    #[error("spawn weights sum to {0}, above 1")]
    WeightsAboveOne(f32),
    #[error("{name}: spawn weight {weight} is negative or not finite")]
    BadWeight { name: String, weight: f32 },
    #[error("{0}: destruction threshold must be at least 1")]
    ZeroThreshold(String),
    #[error("{name}: speed range {min}..{max} is invalid")]
    BadSpeedRange { name: String, min: f32, max: f32 },
    #[error("{0}: fire rate must be positive")]
    BadFireRate(String),
    #[error("{0}: clip must hold at least one shot")]
    ZeroAmmo(String),
    #[error("{0}: reload duration must be non-negative")]
    BadReload(String),
}

/// Reading or writing the best-score file failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialise scores: {0}")]
    Serialise(#[from] ron::Error),
}

//! Boundary errors.
//!
//! The pipeline stages themselves never fail. Errors only arise where
//! untrusted values enter the engine: render requests, configuration files,
//! and serialization of the metadata document.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("confidence must be a finite number in [0, 1], got {0}")]
    InvalidConfidence(f64),
    #[error("canvas size must be between 1 and {max} pixels, got {size}")]
    InvalidCanvasSize { size: u32, max: u32 },
    #[error("invalid rarity policy: {0}")]
    InvalidRarityPolicy(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read config file {path}: {source}", path = path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}", path = path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize artwork metadata: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

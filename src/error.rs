//! Error types for the content graph engine.
//!
//! The engine components (canonicalizer, scorer, link assembler, content
//! validator) never fail: they degrade to empty or neutral results. Errors
//! only surface at the edges where static data and configuration are read.
//!
//! - `AppError`: errors raised while loading catalogs, corpus or settings
//! - `Result<T>`: Type alias for Results using AppError

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Errors raised while loading static data or configuration.
#[derive(Debug, Error)]
pub enum AppError {
    /// A data or config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON data file did not match the expected record shape
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file is not valid TOML for `EngineSettings`
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A base URL override could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an IO error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a JSON error for the given path
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

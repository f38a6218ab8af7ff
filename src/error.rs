//! Error types for the audit pipeline

use thiserror::Error;

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Main error type for audit operations
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to read lock file {path}: {source}")]
    LockFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No supported lock file found in {0} (looked for Gopkg.lock and glide.lock)")]
    LockFileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Download of {url} failed: HTTP status {status}")]
    HttpStatus { url: String, status: u16 },
}

//! Domain-specific error types for the config-application engine.
//!
//! Leaf modules return the typed errors defined here; the passes in
//! [`tasks`](crate::tasks) and the CLI boundary wrap them in
//! [`anyhow::Error`] with context describing the entry being processed.
//! The typed cause stays reachable through [`anyhow::Error::downcast_ref`].
//!
//! # Error taxonomy
//!
//! ```text
//! ConfigError    document missing, unreadable, not JSON, or invalid (before any mutation)
//! ContentError   a file entry's content source cannot be decoded
//! io::Error      filesystem failures, wrapped with path context by resources
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading and validating the config document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config document does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The config document exists but could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config document is not valid JSON or does not match the
    /// expected shape.
    #[error("invalid config document {}: {source}", path.display())]
    Parse {
        /// Path to the document.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// An entry failed load-time validation.
    #[error("invalid entry {item}: {message}")]
    Invalid {
        /// The offending entry (e.g. `storage.files[0]`).
        item: String,
        /// Human-readable reason.
        message: String,
    },
}

/// Errors that arise while decoding a content source into bytes.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The source is not a `data:` URL (remote sources are not supported).
    #[error("unsupported content source scheme: {scheme:?}")]
    UnsupportedScheme {
        /// Scheme found in the source, or the whole source when it has none.
        scheme: String,
    },

    /// The data URL has no `,` separating the header from the payload.
    #[error("malformed data URL: missing ',' after header")]
    MissingPayload,

    /// The payload is marked `;base64` but is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

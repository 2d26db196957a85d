//! Error types for loading, extraction and sidebar synthesis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading an API description, operation list or rules file.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid operation list: {message}")]
    InvalidOperations { message: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors while extracting operations from an API description.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not an API description: missing top-level \"paths\" object")]
    NotAnApiDescription,

    #[error("invalid path item {path}: expected object, got {actual}")]
    InvalidPathItem { path: String, actual: String },

    #[error("invalid field at {pointer}: expected {expected}, got {actual}")]
    InvalidField {
        pointer: String,
        expected: &'static str,
        actual: String,
    },
}

impl ExtractError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Why an operation could not be placed in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("operation has neither an operationId nor a label")]
    MissingIdentity,

    #[error("tag strategy {strategy} cannot be applied: {message}")]
    UnusableTagStrategy { strategy: String, message: String },
}

/// Errors during sidebar synthesis. Synthesis never returns a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesizeError {
    #[error("malformed operation at position {position}: {reason}")]
    MalformedOperation {
        /// Index of the operation in the input sequence.
        position: usize,
        reason: MalformedReason,
    },
}

impl SynthesizeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }

    /// Input position of the offending operation.
    pub fn position(&self) -> usize {
        match self {
            SynthesizeError::MalformedOperation { position, .. } => *position,
        }
    }
}

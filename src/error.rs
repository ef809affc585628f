//! Error types for JSON Composer
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::SampleRole;
use thiserror::Error;

/// The main error type for JSON Composer
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Discovery Errors
    // ============================================================================
    #[error("Malformed {role} sample #{index} in group '{group}': {message}")]
    MalformedSample {
        group: String,
        index: usize,
        role: SampleRole,
        message: String,
    },

    #[error("Group '{group}' has no usable sample pairs")]
    EmptyGroup { group: String },

    // ============================================================================
    // Composition Errors
    // ============================================================================
    #[error("No source groups were supplied")]
    NoGroups,

    #[error("No concept graphs to compose")]
    NoGraphs,

    #[error("Duplicate source group name: {group}")]
    DuplicateGroup { group: String },

    // ============================================================================
    // Configuration / Input Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Encoding Errors
    // ============================================================================
    #[error("Graph encoding failed: {0}")]
    Encode(#[from] quick_xml::Error),

    // ============================================================================
    // Runtime Errors
    // ============================================================================
    #[error("Discovery task failed: {message}")]
    Task { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed sample error
    pub fn malformed(
        group: impl Into<String>,
        index: usize,
        role: SampleRole,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedSample {
            group: group.into(),
            index,
            role,
            message: message.into(),
        }
    }

    /// Create an empty group error
    pub fn empty_group(group: impl Into<String>) -> Self {
        Self::EmptyGroup {
            group: group.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a task error
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedSample { .. }
                | Error::EmptyGroup { .. }
                | Error::NoGroups
                | Error::NoGraphs
                | Error::DuplicateGroup { .. }
                | Error::InvalidParameter { .. }
                | Error::JsonParse(_)
                | Error::YamlParse(_)
        )
    }
}

/// Result type alias for JSON Composer
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the avionix telemetry engine.
//!
//! Every failure in the engine is recoverable: callers on the lenient paths
//! (`get`, `load`, formula evaluation) log the error and substitute a safe default.
//! The fallible `try_*` variants surface these errors for callers that want them.
//!
//! # Examples
//!
//! ```
//! use avionix_core::{AvionixError, Result};
//!
//! fn lookup(name: &str) -> Result<f64> {
//!     Err(AvionixError::unknown_variable(name))
//! }
//!
//! assert!(lookup("AIRSPEED").is_err());
//! ```

/// Root error type for all avionix operations.
#[derive(Debug, thiserror::Error)]
pub enum AvionixError {
    /// The configuration could not be fetched or parsed.
    ///
    /// The loader recovers by substituting the built-in fallback configuration.
    #[error("Configuration unavailable: {context}")]
    ConfigUnavailable {
        /// Where the configuration was loaded from
        context: String,
        /// The underlying I/O, HTTP or parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read referenced a variable that is not present in the store.
    #[error("Unknown variable: {name}")]
    UnknownVariable {
        /// The (upper-cased) variable name
        name: String,
    },

    /// A formula failed to compile or evaluate.
    #[error("Formula error in '{formula}': {reason}")]
    Formula {
        /// The formula source text
        formula: String,
        /// Description of the failure
        reason: String,
    },

    /// A derived variable names a source variable that does not exist.
    #[error("Variable '{variable}' is derived from unknown variable '{source_name}'")]
    MissingDependency {
        /// The derived variable
        variable: String,
        /// The missing source variable
        source_name: String,
    },

    /// The subscription or engine has already been shut down.
    #[error("Handle is closed")]
    Closed,
}

impl AvionixError {
    /// Create a configuration error wrapping the underlying failure
    pub fn config_unavailable(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigUnavailable {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Create an unknown variable error
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create a formula error
    pub fn formula(formula: impl Into<String>, reason: impl ToString) -> Self {
        Self::Formula {
            formula: formula.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing dependency error
    pub fn missing_dependency(variable: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::MissingDependency {
            variable: variable.into(),
            source_name: source_name.into(),
        }
    }

    /// Check if the engine recovers locally from this error
    ///
    /// Only `Closed` indicates a handle that can no longer be used.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Specialized Result type for avionix operations
pub type Result<T> = std::result::Result<T, AvionixError>;

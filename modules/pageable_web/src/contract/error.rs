//! Contract error types for pageable resolution
//!
//! These errors are transport-agnostic. An absent pagination value is NOT an
//! error: resolvers report it as `Ok(None)`.

use thiserror::Error;

/// Pageable resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageableError {
    /// A page request could not be built from the given values
    #[error("Invalid page request: {reason}")]
    InvalidPageRequest {
        /// Why the values were rejected
        reason: String,
    },

    /// A sort direction token was neither `asc` nor `desc`
    #[error("Invalid sort direction '{value}'. Expected 'asc' or 'desc'")]
    InvalidDirection {
        /// Offending token
        value: String,
    },

    /// A handler declares a default that cannot produce a page request
    #[error("Invalid default configured for handler '{method}': {reason}")]
    InvalidDefault {
        /// Handler name
        method: String,
        /// Why the default is invalid
        reason: String,
    },

    /// A handler declares several pageable parameters that cannot be told apart
    #[error(
        "Invalid handler declaration '{method}': found multiple {kind} parameters \
         without unique qualifiers"
    )]
    AmbiguousParameters {
        /// Handler name
        method: String,
        /// Parameter kind (pageable, sort)
        kind: String,
    },

    /// A resolver was asked for a parameter it does not support
    #[error("Parameter '{parameter}' of handler '{method}' is not supported by this resolver")]
    UnsupportedParameter {
        /// Handler name
        method: String,
        /// Parameter name
        parameter: String,
    },

    /// Resolver configuration is invalid
    #[error("Invalid pageable configuration: {message}")]
    Configuration {
        /// Validation message
        message: String,
    },
}

impl PageableError {
    /// Whether the error was caused by request input rather than server setup
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageRequest { .. } | Self::InvalidDirection { .. }
        )
    }
}

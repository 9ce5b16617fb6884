//! Mock Engine Error Hierarchy
//!
//! Defines the error types for mock resolution, categorized by whether they
//! represent a defect in the test's mocking setup or a simulated transport
//! failure returned to the code under test.

use std::fmt;

use crate::context::ContextId;
use crate::http::Request;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Test-authoring defects: no resolver registered, or the registered
    /// resolver rejected the request shape. Fatal to the current test step.
    #[error(transparent)]
    Mock(#[from] MockError),

    /// A simulated transport failure produced by a resolver. Returned to the
    /// calling transport layer exactly as a real network failure would be.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response builder failures
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Engine configuration loading failures
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// True for errors that indicate a defect in the mocking setup itself.
    ///
    /// These must be surfaced to the test author, never handled as an
    /// ordinary transport outcome.
    pub fn is_setup_defect(&self) -> bool {
        matches!(self, Error::Mock(_))
    }

    /// True for simulated call failures that downstream error-handling code
    /// under test is expected to handle.
    pub fn is_simulated_failure(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// No resolver found in the context's local registry, anywhere in its
    /// ancestry chain, nor in the global registry.
    #[error("no mock resolver registered for context {context}")]
    NoMockRegistered { context: ContextId },

    /// A resolver exists but its matching logic rejected this request.
    #[error("mock resolver did not match request {} {}: {failure}", request.method, request.url)]
    ResolverMismatch { request: Request, failure: MatchFailure },
}

/// Distinguished "no branch matched" signal returned by resolvers.
///
/// Resolvers signal an intentional non-match with this type; any other
/// failure inside a resolver is a genuine programming error and propagates
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct MatchFailure {
    detail: String,
}

impl MatchFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Simulated failure of the mocked call.
///
/// Shaped like a genuine network failure so the failure path of the code
/// under test is exercised unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mocked transport failure: {reason}")]
pub struct TransportError {
    pub reason: Reason,
}

impl TransportError {
    pub fn new(reason: impl Into<Reason>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Opaque failure payload carried by a [`TransportError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason(String);

impl Reason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reason {
    fn from(reason: &str) -> Self {
        Reason(reason.to_string())
    }
}

impl From<String> for Reason {
    fn from(reason: String) -> Self {
        Reason(reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Status override outside the valid 100..=599 range
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// Body encoder failures, propagated unmodified
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("encoding failed: {0}")]
    Other(String),
}

// ============== Conversion Implementations ============== //
impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Error::Build(BuildError::Encode(e))
    }
}

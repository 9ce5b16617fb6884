//! In-memory request/response records exchanged with the HTTP client
//! collaborator.
//!
//! This module owns the boundary shapes of the engine:
//! - [`Request`] and [`Response`] records (the only "wire format" involved)
//! - [`RawResult`], the closed set of return shapes accepted from resolvers
//! - the normalizer collapsing raw results into canonical responses
//! - convenience response builders with a pluggable body encoder

mod builder;
mod normalizer;


pub use builder::*;
pub use normalizer::*;

use crate::errors::Reason;

/// Ordered header sequence. Duplicate names are preserved in order.
pub type Headers = Vec<(String, String)>;

/// Opaque body payload
pub type Body = Vec<u8>;

/// Outgoing request as seen by the engine. Read-only: resolvers and the
/// engine itself never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(
        url: impl Into<String>,
        body: impl Into<Body>,
    ) -> Self {
        Self {
            body: body.into(),
            ..Self::new("POST", url)
        }
    }
}

/// Canonical response record. Immutable once produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Body,
}

impl Response {
    pub fn new(
        status: u16,
        headers: Headers,
        body: Body,
    ) -> Self {
        Self { status, headers, body }
    }

    /// Only the short-tuple and builder construction paths validate status;
    /// direct construction is the caller's responsibility.
    pub(crate) fn is_valid_status(status: u16) -> bool {
        (100..=599).contains(&status)
    }
}

/// Return shapes accepted from a resolver.
///
/// A small closed sum at the interface boundary: resolvers that produce
/// anything outside the recognized shapes still pass an explicit reason via
/// [`RawResult::Opaque`] so an unanticipated value produces *some* error
/// rather than an unhandled failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    /// Already-canonical response, returned unchanged
    Response(Response),
    /// Short `(status, headers, body)` form, wrapped verbatim
    Parts {
        status: u16,
        headers: Headers,
        body: Body,
    },
    /// Explicit success wrapper, unwrapped
    Success(Response),
    /// Explicit simulated transport failure
    Failure(Reason),
    /// Catch-all for unrecognized return values
    Opaque(Reason),
}

impl RawResult {
    pub fn parts(
        status: u16,
        headers: Headers,
        body: impl Into<Body>,
    ) -> Self {
        RawResult::Parts {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn failure(reason: impl Into<Reason>) -> Self {
        RawResult::Failure(reason.into())
    }

    pub fn opaque(reason: impl Into<Reason>) -> Self {
        RawResult::Opaque(reason.into())
    }
}

impl From<Response> for RawResult {
    fn from(response: Response) -> Self {
        RawResult::Response(response)
    }
}

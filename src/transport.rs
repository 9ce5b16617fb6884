//! Transport seam between the engine and HTTP client pipelines.
//!
//! An HTTP client pipeline talks to a [`Transport`] without knowing whether
//! it reaches a real network stack; [`MockTransport`] is the interchangeable
//! implementation installed during tests, backed entirely by a
//! [`MockEngine`].


use std::sync::Arc;

use crate::context::ExecutionContext;
use crate::errors::Result;
use crate::http::Request;
use crate::http::Response;
use crate::MockEngine;

/// Produces the response for an outgoing request.
///
/// Implementations must be shareable across concurrently running execution
/// contexts.
pub trait Transport: Send + Sync + 'static {
    /// # Errors
    /// - [`crate::MockError`] variants mark defects in the mocking setup and
    ///   must be surfaced to the test author
    /// - [`crate::TransportError`] is an ordinary simulated failure, handled
    ///   by the code under test like any network failure
    fn fetch(
        &self,
        context: &ExecutionContext,
        request: &Request,
    ) -> Result<Response>;
}

/// Engine-backed transport, the test double for a real network client
#[derive(Clone)]
pub struct MockTransport {
    engine: Arc<MockEngine>,
}

impl MockTransport {
    pub fn new(engine: Arc<MockEngine>) -> Self {
        Self { engine }
    }
}

impl Transport for MockTransport {
    fn fetch(
        &self,
        context: &ExecutionContext,
        request: &Request,
    ) -> Result<Response> {
        self.engine.resolve(context, request)
    }
}

//! Resolver storage and lookup.
//!
//! Three cooperating pieces:
//! - [`LocalRegistry`]: at most one resolver per execution context
//! - [`GlobalRegistry`]: one replaceable process-wide resolver slot
//! - [`AncestryResolver`]: chain search across a context's callers/ancestors

mod ancestry;
mod global;
mod local;

#[cfg(test)]
mod ancestry_test;

pub use ancestry::*;
pub use global::*;
pub use local::*;

use std::fmt;
use std::sync::Arc;

use crate::errors::MatchFailure;
use crate::http::RawResult;
use crate::http::Request;

/// Outcome of one resolver call: a raw response shape, or the distinguished
/// "no branch matched" signal.
pub type ResolverResult = std::result::Result<RawResult, MatchFailure>;

/// Response-producing function registered by a test.
///
/// Owned by whichever registry holds it; cloning shares the underlying
/// function.
#[derive(Clone)]
pub struct Resolver(Arc<dyn Fn(&Request) -> ResolverResult + Send + Sync>);

impl Resolver {
    pub fn new(f: impl Fn(&Request) -> ResolverResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(
        &self,
        request: &Request,
    ) -> ResolverResult {
        (self.0)(request)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

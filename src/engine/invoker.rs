use crate::errors::MockError;
use crate::errors::Result;
use crate::http::normalize;
use crate::http::Request;
use crate::http::Response;
use crate::registry::Resolver;

/// Calls a resolver against a request and canonicalizes the outcome.
///
/// Only the distinguished match-failure kind is intercepted and converted to
/// [`MockError::ResolverMismatch`]; a panic inside the resolver is a genuine
/// programming error in the test and propagates unmodified.
pub(crate) fn invoke(
    resolver: &Resolver,
    request: &Request,
) -> Result<Response> {
    match resolver.call(request) {
        Ok(raw) => Ok(normalize(raw)?),
        Err(failure) => Err(MockError::ResolverMismatch {
            request: request.clone(),
            failure,
        }
        .into()),
    }
}

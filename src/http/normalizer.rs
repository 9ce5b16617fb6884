use super::RawResult;
use super::Response;
use crate::errors::TransportError;

/// Collapses a resolver's raw return value into a canonical [`Response`].
///
/// Mapping:
/// - canonical response or explicit success wrapper -> the response
/// - short `(status, headers, body)` form -> wrapped verbatim, status
///   validated
/// - explicit failure or unrecognized value -> [`TransportError`], signaling
///   "the mocked call failed" rather than "the mock machinery failed"
pub fn normalize(raw: RawResult) -> std::result::Result<Response, TransportError> {
    match raw {
        RawResult::Response(response) | RawResult::Success(response) => Ok(response),
        RawResult::Parts { status, headers, body } => {
            if !Response::is_valid_status(status) {
                return Err(TransportError::new(format!("invalid status code {}", status)));
            }
            Ok(Response::new(status, headers, body))
        }
        RawResult::Failure(reason) | RawResult::Opaque(reason) => Err(TransportError { reason }),
    }
}

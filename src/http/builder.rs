//! Convenience response constructors.
//!
//! Thin sugar over [`Response`]: a content-type default, a status default,
//! and body encoding delegated to a pluggable [`BodyEncoder`] collaborator.
//! Explicit options always take precedence over the defaults.

#[cfg(test)]
use mockall::automock;

use super::Body;
use super::Headers;
use super::Response;
use crate::errors::BuildError;
use crate::errors::EncodeError;

const DEFAULT_STATUS: u16 = 200;
const CONTENT_TYPE: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Body encoding collaborator for the response builders.
///
/// Failures propagate to the builder caller unmodified.
#[cfg_attr(test, automock)]
pub trait BodyEncoder: Send + Sync {
    fn encode_json(
        &self,
        value: &serde_json::Value,
    ) -> std::result::Result<Body, EncodeError>;

    fn encode_text(
        &self,
        text: &str,
    ) -> std::result::Result<Body, EncodeError>;
}

/// Default encoder backed by serde_json
#[derive(Debug, Default, Clone)]
pub struct JsonEncoder;

impl BodyEncoder for JsonEncoder {
    fn encode_json(
        &self,
        value: &serde_json::Value,
    ) -> std::result::Result<Body, EncodeError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn encode_text(
        &self,
        text: &str,
    ) -> std::result::Result<Body, EncodeError> {
        Ok(text.as_bytes().to_vec())
    }
}

/// Overrides accepted by the response builders
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    /// Overrides the default 200 status
    pub status: Option<u16>,
    /// Appended headers; a content-type entry here replaces the builder's
    /// default content-type
    pub headers: Headers,
}

impl ResponseOptions {
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Builds a JSON response through an explicit encoder
pub fn build_json_response(
    encoder: &dyn BodyEncoder,
    body: &serde_json::Value,
    options: ResponseOptions,
) -> std::result::Result<Response, BuildError> {
    let encoded = encoder.encode_json(body)?;
    assemble(JSON_CONTENT_TYPE, encoded, options)
}

/// Builds a plain-text response through an explicit encoder
pub fn build_text_response(
    encoder: &dyn BodyEncoder,
    text: &str,
    options: ResponseOptions,
) -> std::result::Result<Response, BuildError> {
    let encoded = encoder.encode_text(text)?;
    assemble(TEXT_CONTENT_TYPE, encoded, options)
}

/// [`build_json_response`] with the default [`JsonEncoder`]
pub fn json_response(
    body: &serde_json::Value,
    options: ResponseOptions,
) -> std::result::Result<Response, BuildError> {
    build_json_response(&JsonEncoder, body, options)
}

/// [`build_text_response`] with the default [`JsonEncoder`]
pub fn text_response(
    text: &str,
    options: ResponseOptions,
) -> std::result::Result<Response, BuildError> {
    build_text_response(&JsonEncoder, text, options)
}

fn assemble(
    default_content_type: &str,
    body: Body,
    options: ResponseOptions,
) -> std::result::Result<Response, BuildError> {
    let status = options.status.unwrap_or(DEFAULT_STATUS);
    if !Response::is_valid_status(status) {
        return Err(BuildError::InvalidStatus(status));
    }

    let mut headers = Headers::new();
    let content_type_overridden = options
        .headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE));
    if !content_type_overridden {
        headers.push((CONTENT_TYPE.to_string(), default_content_type.to_string()));
    }
    headers.extend(options.headers);

    Ok(Response::new(status, headers, body))
}

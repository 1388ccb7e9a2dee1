//! The boundary between request shaping and the network.
//!
//! A [`RequestBuilder`](crate::RequestBuilder) produces an [`OutgoingRequest`]
//! as plain data; a [`Transport`] sends it and hands back a [`TransportResponse`].
//! Retries, redirects and connection pooling are the transport's business.

use std::future::Future;

use http::{Method, StatusCode};

use crate::client::parameters::FormData;

mod reqwest_transport;
pub use self::reqwest_transport::{ReqwestTransport, ReqwestTransportBuilder};

/// The body of an [`OutgoingRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// A JSON document.
    Json(String),
    /// Form parameters, sent as `multipart/form-data`.
    Form(FormData),
}

/// A fully shaped HTTP request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// The HTTP verb.
    pub method: Method,
    /// The absolute URL, query string included.
    pub url: String,
    /// Headers in insertion order; a name may repeat.
    pub headers: Vec<(String, String)>,
    /// The optional body.
    pub body: Option<RequestBody>,
    /// Whether cookies are sent along with the request.
    pub with_credentials: bool,
}

impl OutgoingRequest {
    /// Returns the first value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns all values of a header, compared case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure to obtain a response, or to read its body.
///
/// DNS errors, connection failures and aborted requests all end up here.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error from its description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// A received response whose body has not been read yet.
pub trait TransportResponse: Send {
    /// The numeric status code.
    fn status(&self) -> u16;

    /// The status text, defaulting to the canonical reason phrase.
    fn status_text(&self) -> String {
        StatusCode::from_u16(self.status())
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string()
    }

    /// Whether the status is in the success range (`200..=299`).
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Reads the whole body as text.
    fn text(self) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Sends an [`OutgoingRequest`].
///
/// Implemented by [`ReqwestTransport`]; tests and embedders can provide their own.
pub trait Transport: Send + Sync {
    /// The response type produced by this transport.
    type Response: TransportResponse;

    /// Sends the request and waits for the response head.
    fn send(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<Self::Response, TransportError>> + Send;
}

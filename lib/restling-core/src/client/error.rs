use std::fmt::Debug;

/// Errors raised while configuring a request.
///
/// These are programming or input errors detected at the call that caused them,
/// before anything is sent. HTTP-level and transport-level failures never surface
/// here: they are delivered to the [`ErrorCallback`](crate::ErrorCallback).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum RestClientError {
    /// A path segment was empty.
    ///
    /// Segments are joined with a single `/`, so an empty one would produce `//`.
    #[display("non-empty path required")]
    EmptyPathSegment,

    /// The HTTP verb is not a valid method token.
    #[display("Invalid HTTP method: {method:?}")]
    #[from(skip)]
    InvalidHttpMethod {
        /// The rejected verb.
        method: String,
    },

    /// Invalid HTTP header name.
    ///
    /// Occurs when a header key contains characters not allowed in a header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    ///
    /// Occurs when header values contain invalid characters.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error.
    ///
    /// Occurs when a parameter value or a body payload cannot be serialized.
    JsonValueError(serde_json::Error),

    /// Parameter value cannot be rendered as a string.
    ///
    /// Objects have no single textual form for query, header, form, cookie or matrix parameters.
    #[display("Unsupported value for parameter '{key}': objects are not supported. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// The parameter key.
        key: String,
        /// The unsupported value that was provided.
        value: serde_json::Value,
    },

    /// The operation is not available on this client.
    ///
    /// Generated for methods flagged as incompatible in their descriptor.
    #[display("Unsupported operation: {operation}")]
    #[from(skip)]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: String,
    },
}

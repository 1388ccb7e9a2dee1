use http::Method;

use super::parameters::Param;

mod builder;
mod execution;

/// Builder shaping one HTTP request, then running it.
///
/// A `RequestBuilder` accumulates the verb, path segments, query, header, form,
/// cookie and matrix parameters, an optional JSON payload and the content
/// negotiation lists. [`execute`](Self::execute) consumes it: a builder serves
/// exactly one HTTP call. Concurrent calls use independent builders.
///
/// # Method Groups
///
/// ## Request Shape
/// - [`method(m)`](Self::method) / [`custom_method(name)`](Self::custom_method) - Set the HTTP verb (default `GET`)
/// - [`path(segments)`](Self::path) - Append non-empty path segments
/// - [`matrix(key, value)`](Self::matrix) - Add a matrix parameter to the last segment
///
/// ## Parameters
/// - [`param(key, value)`](Self::param) - Add query parameters
/// - [`header(key, value)`](Self::header) - Add headers
/// - [`form(key, value)`](Self::form) - Add form parameters (body becomes `multipart/form-data`)
/// - [`cookie(key, value)`](Self::cookie) - Add cookies
///
/// A `None` value is dropped, a sequence adds one parameter per element.
///
/// ## Body and Negotiation
/// - [`data(payload)`](Self::data) - Set the JSON payload
/// - [`produces(media_types)`](Self::produces) - Set the `Accept` defaults
/// - [`consumes(media_types)`](Self::consumes) - Set the `Content-Type` defaults
///
/// ## Execution
/// - [`uri()`](Self::uri) - The target URI
/// - [`request(text_response)`](Self::request) - The request as plain data
/// - [`execute(transport, callback, on_error)`](Self::execute) - Send and dispatch the response
///
/// # Example
///
/// ```rust
/// use restling_core::RequestBuilder;
///
/// # fn example() -> Result<(), restling_core::RestClientError> {
/// let builder = RequestBuilder::new("http://api/")
///     .path(["todo", "list"])?
///     .param("q", "a b")?;
///
/// assert_eq!(builder.uri(), "http://api/todo/list?q=a+b");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    pub(super) base: String,
    pub(super) paths: Vec<String>,
    pub(super) query_params: Vec<Param>,
    pub(super) header_params: Vec<Param>,
    pub(super) form_params: Vec<Param>,
    pub(super) cookie_params: Vec<Param>,
    pub(super) method: Method,
    pub(super) data: Option<String>,
    pub(super) produces: Vec<String>,
    pub(super) consumes: Vec<String>,
}

impl RequestBuilder {
    /// Creates a builder targeting `base`.
    ///
    /// One trailing `/` is stripped from the base URL.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if base.ends_with('/') {
            base.pop();
        }

        Self {
            base,
            paths: Vec::new(),
            query_params: Vec::new(),
            header_params: Vec::new(),
            form_params: Vec::new(),
            cookie_params: Vec::new(),
            method: Method::GET,
            data: None,
            produces: Vec::new(),
            consumes: Vec::new(),
        }
    }
}

impl std::fmt::Display for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.uri())
    }
}

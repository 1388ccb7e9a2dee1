use http::Method;

mod request;
pub use self::request::RequestBuilder;

mod parameters;
pub use self::parameters::{FormData, Param};

mod callback;
pub use self::callback::{
    Completable, DECODE_FAILURE_TEXT, DecodeFailure, ErrorCallback, MultipleResult, RawText,
    ResponseHandler, SingleResult, TRANSPORT_FAILURE_STATUS, TRANSPORT_FAILURE_TEXT,
};

mod transport;
pub use self::transport::{
    OutgoingRequest, ReqwestTransport, ReqwestTransportBuilder, RequestBody, Transport,
    TransportError, TransportResponse,
};

mod error;
pub use self::error::RestClientError;

/// Base of a generated client: a base URL, a service root path and a transport.
///
/// Each call starts from [`request`](Self::request), which yields a fresh
/// [`RequestBuilder`] already pointing at the service root.
///
/// # Example
///
/// ```rust
/// use restling_core::{Method, ReqwestTransport, RestClient};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RestClient::new(
///     "http://localhost:8080/",
///     "/service/todo",
///     ReqwestTransport::builder().build()?,
/// );
///
/// let builder = client.request(Method::GET).path(["list"])?;
/// assert_eq!(builder.uri(), "http://localhost:8080/service/todo/list");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient<X> {
    base_url: String,
    service_path: Vec<String>,
    transport: X,
}

impl<X> RestClient<X>
where
    X: Transport,
{
    /// Creates a client for the service rooted at `service_path` under `base_url`.
    ///
    /// The service path is split on `/`; empty segments are dropped.
    pub fn new(base_url: impl Into<String>, service_path: &str, transport: X) -> Self {
        let service_path = service_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            base_url: base_url.into(),
            service_path,
            transport,
        }
    }

    /// Starts a request with the given verb, rooted at the service path.
    pub fn request(&self, method: Method) -> RequestBuilder {
        let mut builder = RequestBuilder::new(self.base_url.clone()).method(method);
        builder.paths.extend(self.service_path.iter().cloned());
        builder
    }

    /// The transport used to send requests.
    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// The base URL, as given.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_rooted_at_service_path() {
        let transport = ReqwestTransport::builder().build().expect("transport");
        let client = RestClient::new("http://api/", "/service//todo/", transport);

        let builder = client.request(Method::DELETE);

        assert_eq!(builder.to_string(), "DELETE http://api/service/todo");
    }

    #[test]
    fn test_root_service_path_adds_no_segment() {
        let transport = ReqwestTransport::builder().build().expect("transport");
        let client = RestClient::new("http://api", "/", transport);

        assert_eq!(client.request(Method::GET).uri(), "http://api");
    }
}

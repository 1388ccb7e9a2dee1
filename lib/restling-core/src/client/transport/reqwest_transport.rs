use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Body, Request};
use tracing::debug;
use url::Url;

use super::{OutgoingRequest, RequestBody, Transport, TransportError, TransportResponse};

/// [`Transport`] backed by a [`reqwest::Client`].
///
/// The client keeps a cookie store so cookies set by the server are sent back on
/// later calls, matching the same-origin credentials policy of generated clients.
///
/// # Example
///
/// ```rust
/// use restling_core::ReqwestTransport;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::builder()
///     .with_user_agent("todo-app/1.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a builder with the default configuration.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Wraps an existing client as is.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build_request(request: OutgoingRequest) -> Result<Request, TransportError> {
        let OutgoingRequest {
            method,
            url,
            headers,
            body,
            with_credentials: _,
        } = request;

        let url = url
            .parse::<Url>()
            .map_err(|error| TransportError::new(format!("invalid URL '{url}': {error}")))?;
        let mut request = Request::new(method, url);
        let req_headers = request.headers_mut();

        for (name, value) in &headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|error| TransportError::new(error.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|error| TransportError::new(error.to_string()))?;
            req_headers.append(name, value);
        }

        match body {
            Some(RequestBody::Json(json)) => {
                *request.body_mut() = Some(Body::from(json));
            }
            Some(RequestBody::Form(form)) => {
                // the body only parses with its own boundary
                let (content_type, data) = form.encode();
                let content_type = HeaderValue::from_str(&content_type)
                    .map_err(|error| TransportError::new(error.to_string()))?;
                req_headers.insert(CONTENT_TYPE, content_type);
                *request.body_mut() = Some(Body::from(data));
            }
            None => {}
        }

        Ok(request)
    }
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;

    async fn send(&self, request: OutgoingRequest) -> Result<Self::Response, TransportError> {
        let request = Self::build_request(request)?;
        debug!(?request, "sending...");
        let response = self.client.execute(request).await?;
        debug!(?response, "...receiving");
        Ok(response)
    }
}

impl TransportResponse for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    async fn text(self) -> Result<String, TransportError> {
        let text = reqwest::Response::text(self).await?;
        Ok(text)
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    user_agent: Option<String>,
}

impl ReqwestTransportBuilder {
    /// Sets the `User-Agent` sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Fails when the underlying reqwest client cannot be created.
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build()?;
        Ok(ReqwestTransport { client })
    }
}

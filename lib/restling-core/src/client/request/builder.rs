use std::fmt::Display;

use http::Method;
use http::header::{HeaderName, HeaderValue};
use serde::Serialize;

use super::RequestBuilder;
use crate::client::RestClientError;
use crate::client::parameters::{
    Param, encode_cookie_value, encode_params, encode_path_component, push_params,
};

impl RequestBuilder {
    // =============================================================================
    // Request Shape
    // =============================================================================

    /// Sets the HTTP verb.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a custom HTTP verb from its name.
    ///
    /// # Errors
    ///
    /// Fails with [`RestClientError::InvalidHttpMethod`] when `method` is not a valid token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use restling_core::RequestBuilder;
    /// # fn example() -> Result<(), restling_core::RestClientError> {
    /// let builder = RequestBuilder::new("http://api").custom_method("PURGE")?;
    /// assert_eq!(builder.to_string(), "PURGE http://api");
    /// # Ok(())
    /// # }
    /// ```
    pub fn custom_method(self, method: &str) -> Result<Self, RestClientError> {
        let parsed = Method::from_bytes(method.as_bytes()).map_err(|_| {
            RestClientError::InvalidHttpMethod {
                method: method.to_string(),
            }
        })?;
        Ok(self.method(parsed))
    }

    /// Appends path segments, each one prefixed with `/`.
    ///
    /// Segments are appended as is: a placeholder value containing `/` spans
    /// several segments.
    ///
    /// # Errors
    ///
    /// Fails with [`RestClientError::EmptyPathSegment`] as soon as a segment renders empty.
    pub fn path<I, S>(mut self, segments: I) -> Result<Self, RestClientError>
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        for segment in segments {
            let segment = segment.to_string();
            if segment.is_empty() {
                return Err(RestClientError::EmptyPathSegment);
            }
            self.paths.push(segment);
        }
        Ok(self)
    }

    /// Adds a matrix parameter (`;key=value`) to the last path segment.
    ///
    /// A `None` value is dropped, a sequence adds one `;key=value` per element.
    ///
    /// # Errors
    ///
    /// Fails with [`RestClientError::EmptyPathSegment`] when no path segment was added yet,
    /// or when the value cannot be rendered.
    pub fn matrix<T>(mut self, key: &str, value: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        let mut params = Vec::new();
        push_params(&mut params, key, value)?;
        if params.is_empty() {
            return Ok(self);
        }

        let last = self
            .paths
            .last_mut()
            .ok_or(RestClientError::EmptyPathSegment)?;
        for param in params {
            last.push(';');
            last.push_str(&encode_path_component(param.key()));
            last.push('=');
            last.push_str(&encode_path_component(param.value()));
        }
        Ok(self)
    }

    // =============================================================================
    // Parameters
    // =============================================================================

    /// Adds query parameters.
    ///
    /// # Errors
    ///
    /// Fails when the value is an object or cannot be serialized.
    pub fn param<T>(mut self, key: &str, value: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        push_params(&mut self.query_params, key, value)?;
        Ok(self)
    }

    /// Adds headers.
    ///
    /// A header set here is never overridden by content negotiation defaults,
    /// except `Content-Type` with form parameters: a multipart body needs its boundary.
    ///
    /// # Errors
    ///
    /// Fails when the key is not a valid header name, when a value is not a valid
    /// header value, or when the value cannot be rendered.
    pub fn header<T>(mut self, key: &str, value: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        HeaderName::from_bytes(key.as_bytes())?;
        let mut params = Vec::new();
        push_params(&mut params, key, value)?;
        for param in &params {
            HeaderValue::from_str(param.value())?;
        }
        self.header_params.extend(params);
        Ok(self)
    }

    /// Adds form parameters.
    ///
    /// As soon as one form parameter is present, the body is the form and any
    /// [`data`](Self::data) payload is ignored.
    ///
    /// # Errors
    ///
    /// Fails when the value is an object or cannot be serialized.
    pub fn form<T>(mut self, key: &str, value: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        push_params(&mut self.form_params, key, value)?;
        Ok(self)
    }

    /// Adds cookies, sent in a single `Cookie` header.
    ///
    /// Values are percent-encoded: `;`, `,`, `%`, control and non-ASCII characters.
    ///
    /// # Errors
    ///
    /// Fails when the name is not a valid token, or when the value is an object
    /// or cannot be serialized.
    pub fn cookie<T>(mut self, key: &str, value: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        HeaderName::from_bytes(key.as_bytes())?;
        let mut params = Vec::new();
        push_params(&mut params, key, value)?;
        for param in params {
            let value = encode_cookie_value(param.value());
            HeaderValue::from_str(&value)?;
            self.cookie_params.push(Param::new(key, value));
        }
        Ok(self)
    }

    // =============================================================================
    // Body and Negotiation
    // =============================================================================

    /// Sets the `Accept` media types used when the request has a JSON payload.
    ///
    /// Replaces any previous list; an empty list clears it.
    pub fn produces<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `Content-Type` media types used when the request has a JSON payload.
    ///
    /// Replaces any previous list, except that an empty list is ignored.
    pub fn consumes<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let media_types = media_types.into_iter().map(Into::into).collect::<Vec<_>>();
        if !media_types.is_empty() {
            self.consumes = media_types;
        }
        self
    }

    /// Sets the payload sent as JSON.
    ///
    /// A payload serializing to `null` clears it.
    ///
    /// # Errors
    ///
    /// Fails when the payload cannot be serialized.
    pub fn data<T>(mut self, payload: &T) -> Result<Self, RestClientError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(payload)?;
        self.data = (json != "null").then_some(json);
        Ok(self)
    }

    // =============================================================================
    // Accessors
    // =============================================================================

    /// The target URI: base, path segments and query string.
    pub fn uri(&self) -> String {
        let mut out = self.base.clone();
        for segment in &self.paths {
            out.push('/');
            out.push_str(segment);
        }
        out.push_str(&self.query());
        out
    }

    /// The query string prefixed with `?`, or the empty string without query parameters.
    pub fn query(&self) -> String {
        let query = encode_params(&self.query_params);
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    /// The HTTP verb.
    pub fn http_method(&self) -> &Method {
        &self.method
    }

    /// The query parameters, in order.
    pub fn query_params(&self) -> &[Param] {
        &self.query_params
    }

    /// The header parameters, in order.
    pub fn header_params(&self) -> &[Param] {
        &self.header_params
    }

    /// The form parameters, in order.
    pub fn form_params(&self) -> &[Param] {
        &self.form_params
    }
}

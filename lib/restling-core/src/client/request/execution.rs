use http::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use tracing::{debug, warn};

use super::RequestBuilder;
use crate::client::callback::{
    DECODE_FAILURE_TEXT, ErrorCallback, ResponseHandler, TRANSPORT_FAILURE_STATUS,
    TRANSPORT_FAILURE_TEXT,
};
use crate::client::parameters::{FormData, Param};
use crate::client::transport::{
    OutgoingRequest, RequestBody, Transport, TransportError, TransportResponse,
};

/// Default `Accept` for text responses without declared media types.
const TEXT_ACCEPT: &str = "text/html";

impl RequestBuilder {
    /// Shapes the request as plain data.
    ///
    /// Body and negotiation rules, first match wins:
    /// 1. with form parameters, the body is the form; the [`data`](Self::data) payload is ignored
    /// 2. with a payload, the body is its JSON text; `Content-Type` defaults to the
    ///    `consumes` list (or `application/json`), `Accept` to the `produces` list (or
    ///    `text/html` for text responses, `application/json` otherwise)
    /// 3. otherwise, no body and no negotiation header
    ///
    /// Defaults never override a header set with [`header`](Self::header).
    /// A form body is the exception: the transport replaces `Content-Type` with
    /// the multipart type carrying the boundary. Cookies are always sent.
    pub fn request(&self, text_response: bool) -> OutgoingRequest {
        let mut headers = self
            .header_params
            .iter()
            .map(|param| (param.key().to_string(), param.value().to_string()))
            .collect::<Vec<_>>();

        if !self.cookie_params.is_empty() {
            let cookie = self
                .cookie_params
                .iter()
                .map(|param| format!("{}={}", param.key(), param.value()))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push((COOKIE.to_string(), cookie));
        }

        let body = if !self.form_params.is_empty() {
            Some(RequestBody::Form(FormData::from(self.form_params.clone())))
        } else if let Some(data) = &self.data {
            if !has_header(&self.header_params, CONTENT_TYPE.as_str()) {
                if self.consumes.is_empty() {
                    headers.push((CONTENT_TYPE.to_string(), mime::APPLICATION_JSON.to_string()));
                } else {
                    headers.extend(
                        self.consumes
                            .iter()
                            .map(|media| (CONTENT_TYPE.to_string(), media.clone())),
                    );
                }
            }
            if !has_header(&self.header_params, ACCEPT.as_str()) {
                if !self.produces.is_empty() {
                    headers.extend(
                        self.produces
                            .iter()
                            .map(|media| (ACCEPT.to_string(), media.clone())),
                    );
                } else if text_response {
                    headers.push((ACCEPT.to_string(), TEXT_ACCEPT.to_string()));
                } else {
                    headers.push((ACCEPT.to_string(), mime::APPLICATION_JSON.to_string()));
                }
            }
            Some(RequestBody::Json(data.clone()))
        } else {
            None
        };

        OutgoingRequest {
            method: self.method.clone(),
            url: self.uri(),
            headers,
            body,
            with_credentials: true,
        }
    }

    /// Sends the request and dispatches the outcome.
    ///
    /// Exactly one of `callback` and `on_error` is invoked, once:
    /// - a success status (`200..=299`) delivers the body to `callback`, parsed as
    ///   JSON for [`SingleResult`](crate::SingleResult) and [`MultipleResult`](crate::MultipleResult);
    ///   a body that fails to parse goes to `on_error` with status text `"SyntaxError"`
    /// - any other status sends the status code, status text and raw body to `on_error`
    /// - when no response is received (or its body cannot be read), `on_error` gets
    ///   status `-1`, status text `"TypeError"` and the stringified failure
    ///
    /// The body is always read before a callback is invoked.
    pub async fn execute<X, C>(self, transport: &X, callback: C, on_error: ErrorCallback)
    where
        X: Transport,
        C: ResponseHandler,
    {
        let request = self.request(callback.is_text());
        debug!(method = %request.method, url = %request.url, "executing");

        let response = match transport.send(request).await {
            Ok(response) => response,
            Err(error) => return report_transport_failure(on_error, &error),
        };

        let status = response.status();
        let ok = response.ok();
        let status_text = response.status_text();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return report_transport_failure(on_error, &error),
        };
        debug!(status, ok, "response received");

        if !ok {
            on_error.on_error(i32::from(status), status_text, body);
            return;
        }

        if let Err(failure) = callback.deliver(body) {
            warn!(status, error = %failure, "fail to decode response body");
            on_error.on_error(
                i32::from(status),
                DECODE_FAILURE_TEXT.to_string(),
                failure.body,
            );
        }
    }
}

fn has_header(params: &[Param], name: &str) -> bool {
    params.iter().any(|param| param.key().eq_ignore_ascii_case(name))
}

fn report_transport_failure(on_error: ErrorCallback, error: &TransportError) {
    warn!(%error, "request did not complete");
    on_error.on_error(
        TRANSPORT_FAILURE_STATUS,
        TRANSPORT_FAILURE_TEXT.to_string(),
        error.to_string(),
    );
}

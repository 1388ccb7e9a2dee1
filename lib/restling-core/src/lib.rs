//! # Restling Core
//!
//! Runtime support for REST clients generated by `restling-codegen`.
//!
//! The crate shapes HTTP requests with a chained [`RequestBuilder`], sends them
//! through a [`Transport`] and dispatches the response to one of four result
//! callbacks, or to an [`ErrorCallback`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restling_core::{ErrorCallback, Method, MultipleResult, ReqwestTransport, RequestBuilder};
//! # use serde::Deserialize;
//! # #[derive(Debug, Deserialize)]
//! # struct ToDo { id: u32, title: String }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::builder().build()?;
//!
//! RequestBuilder::new("http://localhost:8080/")
//!     .method(Method::GET)
//!     .path(["service", "todo", "list"])?
//!     .param("done", &false)?
//!     .execute(
//!         &transport,
//!         MultipleResult::new(|todos: Vec<ToDo>| println!("{todos:?}")),
//!         ErrorCallback::new(|status, status_text, body| {
//!             eprintln!("{status} {status_text}: {body}");
//!         }),
//!     )
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Result Callbacks
//!
//! | Callback | Receives |
//! |----------|----------|
//! | [`SingleResult<T>`] | one JSON value |
//! | [`MultipleResult<T>`] | a JSON array |
//! | [`RawText`] | the unparsed body |
//! | [`Completable`] | nothing |
//!
//! ## Error Handling
//!
//! Configuration mistakes (empty path segment, invalid header, object used as
//! a parameter value) fail immediately with a [`RestClientError`].
//! Everything that happens once the request is sent goes through the
//! [`ErrorCallback`]:
//!
//! - a non-success status: the status code, the status text and the raw body
//! - no response at all: status [`TRANSPORT_FAILURE_STATUS`] (`-1`), status text
//!   [`TRANSPORT_FAILURE_TEXT`] (`"TypeError"`) and the stringified failure
//!
//! ## Re-exports
//!
//! [`Method`] is re-exported from the `http` crate for generated code.

mod client;

pub use http::Method;

pub use self::client::{
    Completable, DECODE_FAILURE_TEXT, DecodeFailure, ErrorCallback, FormData, MultipleResult,
    OutgoingRequest, Param, RawText, ReqwestTransport, ReqwestTransportBuilder, RequestBody,
    RequestBuilder, ResponseHandler, RestClient, RestClientError, SingleResult,
    TRANSPORT_FAILURE_STATUS, TRANSPORT_FAILURE_TEXT, Transport, TransportError,
    TransportResponse,
};

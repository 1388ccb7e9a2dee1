//! Result and error callbacks for [`RequestBuilder::execute`](crate::RequestBuilder::execute).
//!
//! The caller picks how a successful response is delivered by choosing one of
//! four callback types:
//!
//! | Callback | Receives |
//! |----------|----------|
//! | [`SingleResult<T>`] | the body parsed as one JSON value |
//! | [`MultipleResult<T>`] | the body parsed as a JSON array |
//! | [`RawText`] | the unparsed body |
//! | [`Completable`] | nothing, once the body has been drained |
//!
//! Failures go to the [`ErrorCallback`]. Exactly one of the two is invoked, once.

use std::fmt;

use serde::de::DeserializeOwned;

/// Status code reported when no response was received.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// Status text reported when no response was received.
pub const TRANSPORT_FAILURE_TEXT: &str = "TypeError";

/// Status text reported when a successful response body is not valid JSON.
pub const DECODE_FAILURE_TEXT: &str = "SyntaxError";

type Boxed<A> = Box<dyn FnOnce(A) + Send + 'static>;

/// Receives one JSON object parsed from the response body.
pub struct SingleResult<T>(Boxed<T>);

impl<T> SingleResult<T> {
    /// Wraps the function called with the parsed value.
    pub fn new(on_data: impl FnOnce(T) + Send + 'static) -> Self {
        Self(Box::new(on_data))
    }
}

/// Receives a sequence of JSON objects parsed from the response body.
pub struct MultipleResult<T>(Boxed<Vec<T>>);

impl<T> MultipleResult<T> {
    /// Wraps the function called with the parsed values.
    pub fn new(on_data: impl FnOnce(Vec<T>) + Send + 'static) -> Self {
        Self(Box::new(on_data))
    }
}

/// Receives the unparsed response body.
pub struct RawText(Boxed<String>);

impl RawText {
    /// Wraps the function called with the response text.
    pub fn new(on_data: impl FnOnce(String) + Send + 'static) -> Self {
        Self(Box::new(on_data))
    }
}

/// Signals completion, without payload.
pub struct Completable(Box<dyn FnOnce() + Send + 'static>);

impl Completable {
    /// Wraps the function called once the response body has been drained.
    pub fn new(on_done: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(on_done))
    }
}

/// Receives HTTP-level and transport-level failures.
///
/// The arguments are the status code, the status text and the raw response body.
/// When no response was received, the status code is [`TRANSPORT_FAILURE_STATUS`],
/// the status text is [`TRANSPORT_FAILURE_TEXT`] and the body is the stringified failure.
///
/// # Example
///
/// ```rust
/// use restling_core::ErrorCallback;
///
/// let on_error = ErrorCallback::new(|status, status_text, body| {
///     eprintln!("{status} {status_text}: {body}");
/// });
/// # drop(on_error);
/// ```
pub struct ErrorCallback(Box<dyn FnOnce(i32, String, String) + Send + 'static>);

impl ErrorCallback {
    /// Wraps the function called on failure.
    pub fn new(on_error: impl FnOnce(i32, String, String) + Send + 'static) -> Self {
        Self(Box::new(on_error))
    }

    /// Reports a failure.
    pub fn on_error(self, status_code: i32, status_text: String, raw_body: String) {
        (self.0)(status_code, status_text, raw_body);
    }
}

impl<T> fmt::Debug for SingleResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleResult").finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for MultipleResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleResult").finish_non_exhaustive()
    }
}

impl fmt::Debug for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawText").finish_non_exhaustive()
    }
}

impl fmt::Debug for Completable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completable").finish_non_exhaustive()
    }
}

impl fmt::Debug for ErrorCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCallback").finish_non_exhaustive()
    }
}

/// A successful response body that could not be decoded for the callback.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{error}")]
pub struct DecodeFailure {
    pub(crate) body: String,
    pub(crate) error: serde_json::Error,
}

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::SingleResult<T> {}
    impl<T> Sealed for super::MultipleResult<T> {}
    impl Sealed for super::RawText {}
    impl Sealed for super::Completable {}
}

/// The result callbacks accepted by [`RequestBuilder::execute`](crate::RequestBuilder::execute).
///
/// This trait is sealed: only [`SingleResult`], [`MultipleResult`], [`RawText`]
/// and [`Completable`] implement it, so every supplied callback has a known
/// dispatch at compile time.
pub trait ResponseHandler: sealed::Sealed + Send + 'static {
    /// Whether the handler expects a text response rather than JSON.
    ///
    /// Drives the default `Accept` header.
    fn is_text(&self) -> bool;

    /// Delivers a successful response body.
    #[doc(hidden)]
    fn deliver(self, body: String) -> Result<(), DecodeFailure>;
}

impl<T> ResponseHandler for SingleResult<T>
where
    T: DeserializeOwned + 'static,
{
    fn is_text(&self) -> bool {
        false
    }

    fn deliver(self, body: String) -> Result<(), DecodeFailure> {
        let value = parse::<T>(body)?;
        (self.0)(value);
        Ok(())
    }
}

impl<T> ResponseHandler for MultipleResult<T>
where
    T: DeserializeOwned + 'static,
{
    fn is_text(&self) -> bool {
        false
    }

    fn deliver(self, body: String) -> Result<(), DecodeFailure> {
        let values = parse::<Vec<T>>(body)?;
        (self.0)(values);
        Ok(())
    }
}

impl ResponseHandler for RawText {
    fn is_text(&self) -> bool {
        true
    }

    fn deliver(self, body: String) -> Result<(), DecodeFailure> {
        (self.0)(body);
        Ok(())
    }
}

impl ResponseHandler for Completable {
    fn is_text(&self) -> bool {
        false
    }

    fn deliver(self, _body: String) -> Result<(), DecodeFailure> {
        (self.0)();
        Ok(())
    }
}

fn parse<T: DeserializeOwned>(body: String) -> Result<T, DecodeFailure> {
    serde_json::from_str(&body).map_err(|error| DecodeFailure { body, error })
}

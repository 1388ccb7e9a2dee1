//! Request parameter types and their encodings.
//!
//! - [`Param`] - A single rendered key/value pair
//! - [`FormData`] - Form parameters sent as a `multipart/form-data` body
//!
//! Values are any [`serde::Serialize`] type: `null` drops the parameter,
//! arrays expand to one [`Param`] per element in source order.

mod param;
pub use self::param::Param;
pub(in crate::client) use self::param::push_params;

mod query;
pub(in crate::client) use self::query::{encode_cookie_value, encode_params, encode_path_component};

mod form;
pub use self::form::FormData;

use std::borrow::Cow;

use super::Param;

/// Form parameters sent as a `multipart/form-data` body.
///
/// Entries keep the order in which they were added to the request builder.
/// The boundary is chosen when the body is encoded, so the content type must be
/// taken from the same [`FormData::encode`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<Param>,
}

impl FormData {
    /// The form entries, in order.
    pub fn entries(&self) -> &[Param] {
        &self.entries
    }

    /// Encodes the form with a generated boundary.
    ///
    /// Returns the `Content-Type` header value and the body bytes.
    pub fn encode(&self) -> (String, Vec<u8>) {
        let boundary = format!("----formdata-restling-{}", uuid::Uuid::new_v4());
        let content_type = format!("multipart/form-data; boundary={boundary}");
        (content_type, self.encode_with_boundary(&boundary))
    }

    fn encode_with_boundary(&self, boundary: &str) -> Vec<u8> {
        let mut body_data = Vec::new();

        for entry in &self.entries {
            body_data.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body_data.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    escape_field_name(entry.key())
                )
                .as_bytes(),
            );
            body_data.extend_from_slice(entry.value().as_bytes());
            body_data.extend_from_slice(b"\r\n");
        }

        body_data.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body_data
    }
}

/// Percent-encodes `"`, CR and LF in a field name, as browsers do for `FormData`.
fn escape_field_name(name: &str) -> Cow<'_, str> {
    if !name.contains(['"', '\r', '\n']) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 6);
    for c in name.chars() {
        match c {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

impl From<Vec<Param>> for FormData {
    fn from(entries: Vec<Param>) -> Self {
        Self { entries }
    }
}

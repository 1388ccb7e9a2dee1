use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

use super::Param;

/// Characters escaped when encoding a URI component.
///
/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters escaped in a cookie value: the pair separators, `%` and controls.
const COOKIE_VALUE: &AsciiSet = &CONTROLS.add(b';').add(b',').add(b'%');

/// Percent-encodes a query key or value, rendering spaces as `+`.
fn encode_component(value: &str) -> String {
    encode_path_component(value).replace("%20", "+")
}

/// Percent-encodes a value placed inside a path segment.
pub(in crate::client) fn encode_path_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encodes a cookie value so it cannot split the `Cookie` header.
///
/// Non-ASCII characters are encoded too; other characters are kept as is.
pub(in crate::client) fn encode_cookie_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

/// Encodes params as `k=v` pairs joined with `&`, in insertion order.
///
/// An empty list encodes to the empty string.
pub(in crate::client) fn encode_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| {
            format!(
                "{}={}",
                encode_component(param.key()),
                encode_component(param.value())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::space("a b", "a+b")]
    #[case::plus("a+b", "a%2Bb")]
    #[case::reserved("a&b=c", "a%26b%3Dc")]
    #[case::unreserved("-_.!~*'()", "-_.!~*'()")]
    #[case::slash("a/b?", "a%2Fb%3F")]
    #[case::unicode("café", "caf%C3%A9")]
    fn test_encode_component(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_component(input), expected);
    }

    #[rstest]
    #[case::plain("dark", "dark")]
    #[case::separator("a; admin=true", "a%3B admin=true")]
    #[case::comma("a,b", "a%2Cb")]
    #[case::percent("100%", "100%25")]
    #[case::line_break("a\r\nSet-Cookie: x", "a%0D%0ASet-Cookie: x")]
    #[case::unicode("café", "caf%C3%A9")]
    fn test_encode_cookie_value(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_cookie_value(input), expected);
    }

    #[test]
    fn test_path_component_keeps_percent_space() {
        assert_eq!(encode_path_component("a b"), "a%20b");
    }

    #[test]
    fn test_encode_params_preserves_order() {
        let params = vec![
            Param::new("z", "1"),
            Param::new("a", "x y"),
            Param::new("z", "2"),
        ];

        insta::assert_snapshot!(encode_params(&params), @"z=1&a=x+y&z=2");
    }

    #[test]
    fn test_encode_empty_params() {
        assert_eq!(encode_params(&[]), "");
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::client::error::RestClientError;

/// A request parameter: a key and its rendered value.
///
/// Query, header, form, cookie and matrix parameters all share this shape.
/// Multi-valued inputs produce one `Param` per element, so a key may appear
/// several times in a parameter list.
///
/// # Example
///
/// ```rust
/// use restling_core::Param;
///
/// let param = Param::new("q", "a b");
/// assert_eq!(param.key(), "q");
/// assert_eq!(param.value(), "a b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Param{{k='{key}', v={value}}}")]
pub struct Param {
    key: String,
    value: String,
}

impl Param {
    /// Creates a parameter from an already rendered value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The parameter key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The rendered parameter value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Appends the params rendered from `value` to `params`.
///
/// A `null` value is silently dropped, an array expands to one param per element
/// (`null` elements are dropped too), any other scalar appends a single param.
pub(in crate::client) fn push_params<T>(
    params: &mut Vec<Param>,
    key: &str,
    value: &T,
) -> Result<(), RestClientError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value)? {
        Value::Array(items) => {
            for item in items {
                if let Some(param) = render(key, item)? {
                    params.push(param);
                }
            }
        }
        value => {
            if let Some(param) = render(key, value)? {
                params.push(param);
            }
        }
    }
    Ok(())
}

fn render(key: &str, value: Value) -> Result<Option<Param>, RestClientError> {
    let rendered = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        value @ (Value::Array(_) | Value::Object(_)) => {
            return Err(RestClientError::UnsupportedParameterValue {
                key: key.to_string(),
                value,
            });
        }
    };
    Ok(Some(Param::new(key, rendered)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn rendered<T: Serialize + ?Sized>(value: &T) -> Vec<String> {
        let mut params = Vec::new();
        push_params(&mut params, "key", value).expect("should render");
        params.into_iter().map(|it| it.value).collect()
    }

    #[test]
    fn test_scalars_render_without_quotes() {
        assert_eq!(rendered("a b"), vec!["a b"]);
        assert_eq!(rendered(&42), vec!["42"]);
        assert_eq!(rendered(&1.5), vec!["1.5"]);
        assert_eq!(rendered(&true), vec!["true"]);
    }

    #[test]
    fn test_none_is_dropped() {
        assert!(rendered(&None::<String>).is_empty());
        assert_eq!(rendered(&Some("x")), vec!["x"]);
    }

    #[test]
    fn test_iterables_expand_in_order() {
        assert_eq!(rendered(&["c", "a", "b"]), vec!["c", "a", "b"]);
        assert_eq!(rendered(&vec![3, 1, 2]), vec!["3", "1", "2"]);
        assert_eq!(rendered(&[Some(1), None, Some(2)]), vec!["1", "2"]);
        assert!(rendered(&Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn test_objects_are_rejected() {
        #[derive(Serialize)]
        struct Filter {
            name: String,
        }

        let mut params = Vec::new();
        let result = push_params(
            &mut params,
            "filter",
            &Filter {
                name: "x".to_string(),
            },
        );

        assert!(matches!(
            result,
            Err(RestClientError::UnsupportedParameterValue { key, .. }) if key == "filter"
        ));
        assert!(params.is_empty());
    }

    #[test]
    fn test_nested_arrays_are_rejected() {
        let mut params = Vec::new();
        let result = push_params(&mut params, "matrix", &[[1, 2], [3, 4]]);

        assert!(result.is_err());
    }

    #[test]
    fn test_param_display() {
        insta::assert_snapshot!(Param::new("q", "a b"), @"Param{k='q', v=a b}");
    }
}

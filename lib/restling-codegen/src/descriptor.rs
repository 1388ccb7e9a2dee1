use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DescriptorError;

/// A descriptor file: the services to generate clients for.
///
/// # Example
///
/// ```yaml
/// services:
///   - name: ToDoService
///     path: /service/todo
///     methods:
///       - name: deleteToDo
///         verb: DELETE
///         path: /delete/{id}
///         params:
///           - { name: id, type: u32, role: path }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    /// The declared services.
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl ApiDescriptor {
    /// Parses a YAML descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::YamlError`] when the document does not match the model.
    pub fn from_yaml(yaml: &str) -> Result<Self, DescriptorError> {
        let result = serde_saphyr::from_str(yaml)?;
        Ok(result)
    }

    /// Parses a JSON descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::JsonError`] with the path of the offending field.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let result = serde_path_to_error::deserialize(deserializer).map_err(|err| {
            DescriptorError::JsonError {
                path: err.path().to_string(),
                error: err.into_inner(),
            }
        })?;
        Ok(result)
    }

    /// Reads a descriptor file, choosing the format from its extension.
    ///
    /// `.yml` and `.yaml` files are read as YAML, `.json` files as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, has another extension, or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        debug!(path = %path.display(), ?extension, "reading descriptor");

        let read = || {
            fs::read_to_string(path).map_err(|error| DescriptorError::Io {
                path: path.to_path_buf(),
                error,
            })
        };
        match extension.as_deref() {
            Some("yml" | "yaml") => Self::from_yaml(&read()?),
            Some("json") => Self::from_json(&read()?),
            _ => Err(DescriptorError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// How the methods of a service deliver their results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStyle {
    /// Methods declare a return type; the generator appends the matching result
    /// callback and an error callback.
    #[default]
    Sync,
    /// Methods already end with a result callback and an error callback.
    Callback,
}

/// One REST service, generated as one client type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// The service name, e.g. `ToDoService`.
    pub name: String,
    /// The root path shared by all methods.
    #[serde(default)]
    pub path: String,
    /// How methods deliver their results.
    #[serde(default)]
    pub style: ServiceStyle,
    /// Default `Accept` media types for all methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Default `Content-Type` media types for all methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// The service operations.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

/// One REST operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// The method name; converted to `snake_case` in the generated code.
    pub name: String,
    /// The HTTP verb, `GET` when absent. Any valid method token is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    /// The path template, relative to the service root, e.g. `/delete/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Overrides the service `produces` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,
    /// Overrides the service `consumes` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,
    /// The parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    /// The return type of a sync-style method, e.g. `Vec<ToDo>`. Absent means no payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// An attribute marking the method as unavailable, e.g. `deprecated`.
    ///
    /// The generated method keeps the attribute and always fails with
    /// `RestClientError::UnsupportedOperation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible: Option<String>,
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// The parameter name.
    pub name: String,
    /// The Rust type of the parameter, e.g. `u32` or `Option<String>`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Where the value goes in the request. Unbound parameters are the body or a callback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Binding>,
    /// The bound name (placeholder, query key, header name...), the parameter name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ParamDescriptor {
    /// Creates an unbound parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            role: None,
            key: None,
        }
    }

    /// Binds the parameter to a request role.
    pub fn with_role(mut self, role: Binding) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the bound name.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The bound name: the explicit key, or the parameter name.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }
}

/// Declared role binding of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Substitutes a `{name}` placeholder of the path template.
    Path,
    /// Query parameter.
    Query,
    /// Request header.
    Header,
    /// Form field; the body becomes `multipart/form-data`.
    Form,
    /// Cookie.
    Cookie,
    /// Matrix parameter on the last path segment.
    Matrix,
}

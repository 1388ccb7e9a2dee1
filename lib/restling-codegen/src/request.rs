use cruet::*;
use http::Method;
use indexmap::IndexMap;
use tracing::warn;

use crate::descriptor::{Binding, MethodDescriptor, ParamDescriptor, ServiceDescriptor, ServiceStyle};
use crate::path::PathTemplate;
use crate::GenerationError;

/// Role of a parameter in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Substitutes a path placeholder.
    Path,
    /// Query parameter.
    Query,
    /// Header.
    Header,
    /// Form field.
    Form,
    /// Cookie.
    Cookie,
    /// Matrix parameter.
    Matrix,
    /// The JSON payload.
    Body,
    /// The result callback or the error callback of a callback-style method.
    Callback,
}

impl From<Binding> for Role {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Path => Self::Path,
            Binding::Query => Self::Query,
            Binding::Header => Self::Header,
            Binding::Form => Self::Form,
            Binding::Cookie => Self::Cookie,
            Binding::Matrix => Self::Matrix,
        }
    }
}

/// A classified parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter identifier, in `snake_case`.
    pub name: String,
    /// The declared Rust type.
    pub ty: String,
    /// Where the value goes.
    pub role: Role,
    /// The bound name: placeholder, query key, header name...
    pub binding: String,
}

/// What a method delivers on success, and so which result callback receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// Nothing: `Completable`.
    Void,
    /// The raw body: `RawText`.
    Text,
    /// A JSON array of the item type: `MultipleResult<T>`.
    Collection(String),
    /// A JSON value: `SingleResult<T>`.
    Single(String),
}

impl ReturnShape {
    /// Classifies a declared return type.
    ///
    /// No type, `()` and `void` are [`Void`](Self::Void); `String` is
    /// [`Text`](Self::Text); `Vec<T>`, `List<T>` and `Collection<T>` are a
    /// [`Collection`](Self::Collection) of `T`; anything else is [`Single`](Self::Single).
    pub fn from_return_type(ty: Option<&str>) -> Self {
        let Some(ty) = ty.map(str::trim) else {
            return Self::Void;
        };
        match split_generic(ty) {
            ("" | "()" | "void", None) => Self::Void,
            ("String", None) => Self::Text,
            ("Vec" | "List" | "Collection", Some(item)) => Self::Collection(item.to_string()),
            _ => Self::Single(ty.to_string()),
        }
    }

    /// Recognizes a result callback type, e.g. `MultipleResult<ToDo>`.
    pub fn from_callback_type(ty: &str) -> Option<Self> {
        match split_generic(ty.trim()) {
            ("Completable", None) => Some(Self::Void),
            ("RawText", None) => Some(Self::Text),
            ("MultipleResult", Some(item)) => Some(Self::Collection(item.to_string())),
            ("SingleResult", Some(item)) => Some(Self::Single(item.to_string())),
            _ => None,
        }
    }
}

/// Whether `ty` names the error callback type.
pub(crate) fn is_error_callback(ty: &str) -> bool {
    matches!(split_generic(ty.trim()), ("ErrorCallback", None))
}

/// Splits `path::Name<Arg>` into `(Name, Some(Arg))`.
fn split_generic(ty: &str) -> (&str, Option<&str>) {
    let (head, arg) = match ty.split_once('<') {
        Some((head, rest)) => (head, rest.strip_suffix('>').map(str::trim)),
        None => (ty, None),
    };
    let head = head.trim();
    let head = head.rsplit_once("::").map_or(head, |(_, name)| name);
    (head, arg)
}

/// A classified method, ready for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// The method identifier, in `snake_case`.
    pub name: String,
    /// The HTTP verb.
    pub http_method: Method,
    /// The path template, relative to the service root.
    pub path: PathTemplate,
    /// The parameters, in declaration order.
    pub parameters: Vec<Parameter>,
    /// `Accept` media types; empty means the runtime defaults.
    pub produces: Vec<String>,
    /// `Content-Type` media types; empty means the runtime defaults.
    pub consumes: Vec<String>,
    /// What the method delivers on success.
    pub return_shape: ReturnShape,
    /// The incompatibility marker, kept on the generated method.
    pub incompatible: Option<String>,
}

impl RequestDescriptor {
    /// Classifies a method declared in `service`.
    ///
    /// An incompatible method is only classified for its signature: its verb,
    /// path and bindings are not checked.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerationError`] found.
    pub fn classify(
        service: &ServiceDescriptor,
        method: &MethodDescriptor,
    ) -> Result<Self, GenerationError> {
        if method.name.trim().is_empty() {
            return Err(GenerationError::EmptyMethodName);
        }
        let name = identifier(&method.name);

        let (declared, callbacks, return_shape) = match service.style {
            ServiceStyle::Sync => (
                method.params.as_slice(),
                &[][..],
                ReturnShape::from_return_type(method.returns.as_deref()),
            ),
            ServiceStyle::Callback => {
                if method.returns.is_some() {
                    warn!(method = %method.name, "return type ignored on a callback-style method");
                }
                match split_callbacks(&method.params) {
                    Ok(split) => split,
                    Err(_) if method.incompatible.is_some() => {
                        (method.params.as_slice(), &[][..], ReturnShape::Void)
                    }
                    Err(error) => return Err(error),
                }
            }
        };

        let parameters = declared
            .iter()
            .map(classify_param)
            .chain(callbacks.iter().map(|param| Parameter {
                role: Role::Callback,
                ..classify_param(param)
            }))
            .collect::<Vec<_>>();

        let produces = method.produces.as_ref().unwrap_or(&service.produces).clone();
        let consumes = method.consumes.as_ref().unwrap_or(&service.consumes).clone();

        if let Some(marker) = &method.incompatible {
            return Ok(Self {
                name,
                http_method: Method::GET,
                path: PathTemplate::default(),
                parameters,
                produces,
                consumes,
                return_shape,
                incompatible: Some(marker.clone()),
            });
        }

        let http_method = parse_verb(method.verb.as_deref())?;
        let path = PathTemplate::parse(method.path.as_deref().unwrap_or_default())?;
        check_path_bindings(&path, &parameters)?;
        check_single_body(&parameters)?;

        Ok(Self {
            name,
            http_method,
            path,
            parameters,
            produces,
            consumes,
            return_shape,
            incompatible: None,
        })
    }

    /// The parameters carrying a role other than [`Role::Callback`].
    pub fn request_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|param| param.role != Role::Callback)
    }

    /// The body parameter, if any.
    pub fn body(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|param| param.role == Role::Body)
    }
}

/// Turns a declared name into a `snake_case` name.
///
/// Names already in snake case are kept as is. The result is checked as a Rust
/// identifier when the method is generated.
pub(crate) fn identifier(name: &str) -> String {
    let name = name.trim();
    if name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        name.to_string()
    } else {
        name.to_snake_case()
    }
}

fn classify_param(param: &ParamDescriptor) -> Parameter {
    Parameter {
        name: identifier(&param.name),
        ty: param.ty.trim().to_string(),
        role: param.role.map_or(Role::Body, Role::from),
        binding: param.key().to_string(),
    }
}

/// Splits off the trailing result callback and error callback.
fn split_callbacks(
    params: &[ParamDescriptor],
) -> Result<(&[ParamDescriptor], &[ParamDescriptor], ReturnShape), GenerationError> {
    let [declared @ .., on_done, on_error] = params else {
        return Err(GenerationError::MissingCallbackParameter);
    };
    if on_done.role.is_some() || on_error.role.is_some() || !is_error_callback(&on_error.ty) {
        return Err(GenerationError::MissingCallbackParameter);
    }
    let shape =
        ReturnShape::from_callback_type(&on_done.ty).ok_or(GenerationError::MissingCallbackParameter)?;

    let callbacks = params
        .get(declared.len()..)
        .ok_or(GenerationError::MissingCallbackParameter)?;
    Ok((declared, callbacks, shape))
}

fn parse_verb(verb: Option<&str>) -> Result<Method, GenerationError> {
    let Some(verb) = verb.map(str::trim) else {
        return Ok(Method::GET);
    };
    Method::from_bytes(verb.to_ascii_uppercase().as_bytes()).map_err(|_| {
        GenerationError::InvalidHttpMethod {
            verb: verb.to_string(),
        }
    })
}

fn check_path_bindings(
    path: &PathTemplate,
    parameters: &[Parameter],
) -> Result<(), GenerationError> {
    let mut bound = IndexMap::<&str, Vec<&str>>::new();
    for param in parameters.iter().filter(|param| param.role == Role::Path) {
        bound
            .entry(param.binding.as_str())
            .or_default()
            .push(param.name.as_str());
    }

    for placeholder in path.placeholders() {
        match bound.get(placeholder).map(Vec::as_slice) {
            None => {
                return Err(GenerationError::UnmatchedPathPlaceholder {
                    placeholder: placeholder.to_string(),
                });
            }
            Some([_]) => {}
            Some(names) => {
                return Err(GenerationError::AmbiguousPathPlaceholder {
                    placeholder: placeholder.to_string(),
                    parameters: names.iter().map(ToString::to_string).collect(),
                });
            }
        }
    }

    for (binding, names) in &bound {
        if !path.placeholders().any(|placeholder| placeholder == *binding) {
            warn!(%binding, ?names, "path parameter not used by the path template");
        }
    }
    Ok(())
}

fn check_single_body(parameters: &[Parameter]) -> Result<(), GenerationError> {
    let bodies = parameters
        .iter()
        .filter(|param| param.role == Role::Body)
        .map(|param| param.name.clone())
        .collect::<Vec<_>>();

    if bodies.len() > 1 {
        return Err(GenerationError::MultipleBodyParameters { parameters: bodies });
    }
    Ok(())
}

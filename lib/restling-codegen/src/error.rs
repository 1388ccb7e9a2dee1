use std::path::PathBuf;

/// Errors raised while loading a descriptor file.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum DescriptorError {
    /// The descriptor file cannot be read.
    #[display("cannot read descriptor {}: {error}", path.display())]
    #[from(skip)]
    Io {
        /// The descriptor file.
        path: PathBuf,
        /// The underlying I/O error.
        error: std::io::Error,
    },

    /// YAML deserialization error.
    #[display("invalid YAML descriptor: {_0}")]
    YamlError(serde_saphyr::Error),

    /// JSON deserialization error, with the path of the offending field.
    #[display("invalid JSON descriptor at '{path}': {error}")]
    #[from(skip)]
    JsonError {
        /// Path to the field that failed, e.g. `services[0].methods[2].params`.
        path: String,
        /// The underlying JSON error.
        error: serde_json::Error,
    },

    /// The file extension is neither YAML nor JSON.
    #[display("unsupported descriptor format: {}", path.display())]
    #[from(skip)]
    UnsupportedFormat {
        /// The descriptor file.
        path: PathBuf,
    },
}

/// Reasons a method cannot be generated.
///
/// A generation error only aborts the method it was raised for: sibling methods
/// of the same service are still generated.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum GenerationError {
    /// The method has no name.
    #[display("method name is empty")]
    EmptyMethodName,

    /// Two methods of the same service share a generated name.
    #[display("method '{name}' is already defined")]
    DuplicateMethod {
        /// The generated method name.
        name: String,
    },

    /// The verb is not a valid HTTP method token.
    #[display("invalid HTTP method: {verb:?}")]
    InvalidHttpMethod {
        /// The declared verb.
        verb: String,
    },

    /// A `{name}` placeholder has no parameter bound to it with the path role.
    #[display("path param {{{placeholder}}} does not match any argument")]
    UnmatchedPathPlaceholder {
        /// The placeholder name, or the whole segment when it is malformed.
        placeholder: String,
    },

    /// Several parameters are bound to the same `{name}` placeholder.
    #[display("path param {{{placeholder}}} matches several arguments: {}", parameters.join(", "))]
    AmbiguousPathPlaceholder {
        /// The placeholder name.
        placeholder: String,
        /// The parameters bound to it.
        parameters: Vec<String>,
    },

    /// More than one parameter has no role binding.
    #[display("only one body parameter is allowed, found: {}", parameters.join(", "))]
    MultipleBodyParameters {
        /// The unbound parameters.
        parameters: Vec<String>,
    },

    /// A callback-style method does not end with a result callback and an error callback.
    #[display(
        "callback-style method must end with a result callback and an ErrorCallback parameter"
    )]
    MissingCallbackParameter,

    /// A method or parameter name is not a Rust identifier.
    #[display("'{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// The name, converted to `snake_case`.
        name: String,
    },

    /// A method or parameter name is a path keyword that cannot be used as an identifier.
    #[display("'{name}' is a reserved identifier")]
    ReservedIdentifier {
        /// The name, converted to `snake_case`.
        name: String,
    },

    /// Two parameters of the same method share a generated name.
    #[display("argument '{name}' is already defined")]
    DuplicateArgument {
        /// The generated argument name.
        name: String,
    },

    /// A parameter of a sync-style method takes the name of a generated callback argument.
    #[display("argument '{name}' is reserved for the generated callbacks")]
    ReservedArgument {
        /// The generated argument name.
        name: String,
    },

    /// A declared type does not parse as a Rust type.
    #[display("invalid type {ty:?}: {message}")]
    InvalidType {
        /// The declared type.
        ty: String,
        /// The parser error.
        message: String,
    },

    /// An incompatibility marker does not parse as an attribute.
    #[display("invalid attribute {attribute:?}: {message}")]
    InvalidAttribute {
        /// The declared marker.
        attribute: String,
        /// The parser error.
        message: String,
    },

    /// The runtime crate path of the configuration does not parse as a Rust path.
    #[display("invalid crate path {path:?}")]
    InvalidCratePath {
        /// The configured path.
        path: String,
    },

    /// The generated tokens do not form a valid Rust file.
    #[display("generated source does not parse: {message}")]
    InvalidSource {
        /// The parser error.
        message: String,
    },
}

/// A generation error located in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("{service}::{method}: {error}")]
pub struct Diagnostic {
    /// The service name.
    pub service: String,
    /// The method name, as declared.
    pub method: String,
    /// What went wrong.
    #[error(source)]
    pub error: GenerationError,
}

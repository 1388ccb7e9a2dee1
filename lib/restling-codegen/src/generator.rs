use std::collections::HashSet;

use cruet::*;
use http::Method;
use tracing::{debug, info, warn};

use crate::descriptor::{ApiDescriptor, ServiceDescriptor, ServiceStyle};
use crate::path::{PathTemplate, TemplateSegment};
use crate::render::RustSource;
use crate::request::{ReturnShape, Role};
use crate::syntax::{rust_ident, rust_meta, rust_type};
use crate::{Diagnostic, GenerationError, RequestDescriptor};

/// Options of the [`ClientGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    crate_path: String,
    type_suffix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            crate_path: "restling_core".to_string(),
            type_suffix: "Client".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the path of the runtime crate in generated code, `restling_core` by default.
    ///
    /// Use `::restling_core` when the code is included in a module shadowing the name,
    /// or a re-export path such as `crate::rest`.
    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    /// Sets the suffix appended to the service name to name the client type, `Client` by default.
    pub fn with_type_suffix(mut self, type_suffix: impl Into<String>) -> Self {
        self.type_suffix = type_suffix.into();
        self
    }

    /// The runtime crate path.
    pub fn crate_path(&self) -> &str {
        &self.crate_path
    }

    /// The client type suffix.
    pub fn type_suffix(&self) -> &str {
        &self.type_suffix
    }
}

/// A path segment of a generated `path(...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A literal segment.
    Literal(String),
    /// The value of a method argument.
    Argument(String),
}

/// One step of a generated call chain.
///
/// `key` is the bound name, `argument` the method argument providing the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderCall {
    /// Starts the request with the verb.
    Request(Method),
    /// Appends path segments.
    Path(Vec<PathSegment>),
    /// Adds a matrix parameter to the last segment.
    Matrix { key: String, argument: String },
    /// Sets the `Accept` defaults.
    Produces(Vec<String>),
    /// Sets the `Content-Type` defaults.
    Consumes(Vec<String>),
    /// Adds a query parameter.
    Param { key: String, argument: String },
    /// Adds a header.
    Header { key: String, argument: String },
    /// Adds a form field.
    Form { key: String, argument: String },
    /// Adds a cookie.
    Cookie { key: String, argument: String },
    /// Sets the JSON payload from the argument.
    Data(String),
    /// Sends the request, dispatching to the callback arguments.
    Execute {
        callback: String,
        error_callback: String,
    },
}

/// Type of a generated method argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentType {
    /// The declared type, as written.
    Declared(String),
    /// The result callback matching the shape.
    Result(ReturnShape),
    /// The error callback.
    Error,
}

/// An argument of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// The identifier.
    pub name: String,
    /// The type.
    pub ty: ArgumentType,
}

impl Argument {
    fn new(name: impl Into<String>, ty: ArgumentType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Body of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// Runs the call chain.
    Chain(Vec<BuilderCall>),
    /// Always fails with `RestClientError::UnsupportedOperation`.
    Unsupported,
}

/// A generated method: signature and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMethod {
    /// The method identifier.
    pub name: String,
    /// The HTTP verb.
    pub http_method: Method,
    /// The path template, relative to the service root.
    pub path: PathTemplate,
    /// The arguments, in order.
    pub arguments: Vec<Argument>,
    /// The body.
    pub body: MethodBody,
    /// The attribute kept from an incompatibility marker.
    pub marker: Option<String>,
}

/// A generated client type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClient {
    /// The type name, e.g. `ToDoServiceClient`.
    pub type_name: String,
    /// The service name, as declared.
    pub service: String,
    /// The service root path.
    pub root_path: String,
    /// The generated methods.
    pub methods: Vec<GeneratedMethod>,
}

/// Result of a generation run.
///
/// Methods that failed are missing from their client and reported in
/// [`diagnostics`](Self::diagnostics).
#[derive(Debug, Clone)]
pub struct Generation {
    config: GeneratorConfig,
    /// The generated clients, one per service.
    pub clients: Vec<GeneratedClient>,
    /// The methods that could not be generated.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// Whether every method was generated.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The Rust source of the generated clients.
    pub fn source(&self) -> RustSource<'_> {
        RustSource::new(&self.config, &self.clients)
    }
}

/// Generates client types from service descriptors.
///
/// # Example
///
/// ```rust
/// use restling_codegen::{ApiDescriptor, ClientGenerator};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = ApiDescriptor::from_yaml(r#"
/// services:
///   - name: ToDoService
///     path: /service/todo
///     methods:
///       - name: getCurrentToDos
///         path: /list
///         returns: Vec<ToDo>
/// "#)?;
///
/// let generation = ClientGenerator::default().generate(&api);
/// assert!(generation.is_ok());
///
/// let source = generation.source().render()?;
/// assert!(source.contains("pub struct ToDoServiceClient<X>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientGenerator {
    config: GeneratorConfig,
}

impl ClientGenerator {
    /// Creates a generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The generator options.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one client per service.
    pub fn generate(&self, api: &ApiDescriptor) -> Generation {
        let mut clients = Vec::with_capacity(api.services.len());
        let mut diagnostics = Vec::new();

        for service in &api.services {
            let (client, service_diagnostics) = self.generate_service(service);
            clients.push(client);
            diagnostics.extend(service_diagnostics);
        }

        Generation {
            config: self.config.clone(),
            clients,
            diagnostics,
        }
    }

    /// Generates the client of one service.
    ///
    /// A method that fails is skipped and reported; the other methods are still generated.
    pub fn generate_service(
        &self,
        service: &ServiceDescriptor,
    ) -> (GeneratedClient, Vec<Diagnostic>) {
        let type_name = format!("{}{}", service.name.to_pascal_case(), self.config.type_suffix);
        debug!(service = %service.name, %type_name, "generating client");

        let mut methods = Vec::with_capacity(service.methods.len());
        let mut diagnostics = Vec::new();
        let mut names = HashSet::new();

        for method in &service.methods {
            let generated = RequestDescriptor::classify(service, method)
                .and_then(|request| self.generate_method(service.style, &request))
                .and_then(|generated| {
                    if names.insert(generated.name.clone()) {
                        Ok(generated)
                    } else {
                        Err(GenerationError::DuplicateMethod {
                            name: generated.name,
                        })
                    }
                });

            match generated {
                Ok(generated) => {
                    debug!(
                        method = %generated.name,
                        verb = %generated.http_method,
                        path = %generated.path,
                        "method generated"
                    );
                    methods.push(generated);
                }
                Err(error) => {
                    let diagnostic = Diagnostic {
                        service: service.name.clone(),
                        method: method.name.clone(),
                        error,
                    };
                    warn!(%diagnostic, "method skipped");
                    diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            service = %service.name,
            methods = methods.len(),
            failures = diagnostics.len(),
            "client generated"
        );
        let client = GeneratedClient {
            type_name,
            service: service.name.clone(),
            root_path: service.path.clone(),
            methods,
        };
        (client, diagnostics)
    }

    /// Lowers a classified method into a signature and a call chain.
    ///
    /// Sync-style methods get two extra arguments, `on_done` (the result callback
    /// matching the return shape) and `on_error`. Callback-style methods keep
    /// their declared callbacks.
    ///
    /// # Errors
    ///
    /// Fails when the signature would not compile (invalid or reserved identifier,
    /// duplicate argument, invalid type or marker), or with
    /// [`GenerationError::UnmatchedPathPlaceholder`] when a placeholder has no
    /// path-bound parameter.
    pub fn generate_method(
        &self,
        style: ServiceStyle,
        request: &RequestDescriptor,
    ) -> Result<GeneratedMethod, GenerationError> {
        let arguments = arguments(style, request);
        check_signature(style, request, &arguments)?;

        let body = if request.incompatible.is_some() {
            MethodBody::Unsupported
        } else {
            MethodBody::Chain(call_chain(style, request)?)
        };

        Ok(GeneratedMethod {
            name: request.name.clone(),
            http_method: request.http_method.clone(),
            path: request.path.clone(),
            arguments,
            body,
            marker: request.incompatible.clone(),
        })
    }
}

const ON_DONE: &str = "on_done";
const ON_ERROR: &str = "on_error";

fn arguments(style: ServiceStyle, request: &RequestDescriptor) -> Vec<Argument> {
    let mut arguments = request
        .parameters
        .iter()
        .map(|param| {
            let ty = match param.role {
                Role::Callback => ReturnShape::from_callback_type(&param.ty)
                    .map_or(ArgumentType::Error, ArgumentType::Result),
                _ => ArgumentType::Declared(param.ty.clone()),
            };
            Argument::new(&param.name, ty)
        })
        .collect::<Vec<_>>();

    if style == ServiceStyle::Sync {
        arguments.push(Argument::new(
            ON_DONE,
            ArgumentType::Result(request.return_shape.clone()),
        ));
        arguments.push(Argument::new(ON_ERROR, ArgumentType::Error));
    }
    arguments
}

fn check_signature(
    style: ServiceStyle,
    request: &RequestDescriptor,
    arguments: &[Argument],
) -> Result<(), GenerationError> {
    rust_ident(&request.name)?;
    if let Some(marker) = &request.incompatible {
        rust_meta(marker)?;
    }

    let declared = request.parameters.len();
    let mut names = HashSet::new();
    for (index, Argument { name, ty }) in arguments.iter().enumerate() {
        let synthesized = [ON_DONE, ON_ERROR].contains(&name.as_str());
        if style == ServiceStyle::Sync && index < declared && synthesized {
            return Err(GenerationError::ReservedArgument { name: name.clone() });
        }
        rust_ident(name)?;
        if !names.insert(name.as_str()) {
            return Err(GenerationError::DuplicateArgument { name: name.clone() });
        }
        match ty {
            ArgumentType::Declared(ty)
            | ArgumentType::Result(ReturnShape::Collection(ty) | ReturnShape::Single(ty)) => {
                rust_type(ty)?;
            }
            ArgumentType::Result(ReturnShape::Void | ReturnShape::Text) | ArgumentType::Error => {}
        }
    }
    Ok(())
}

fn call_chain(
    style: ServiceStyle,
    request: &RequestDescriptor,
) -> Result<Vec<BuilderCall>, GenerationError> {
    let mut calls = vec![BuilderCall::Request(request.http_method.clone())];

    let segments = request
        .path
        .segments()
        .iter()
        .map(|segment| match segment {
            TemplateSegment::Literal(literal) => Ok(PathSegment::Literal(literal.clone())),
            TemplateSegment::Placeholder(placeholder) => request
                .parameters
                .iter()
                .find(|param| param.role == Role::Path && param.binding == *placeholder)
                .map(|param| PathSegment::Argument(param.name.clone()))
                .ok_or_else(|| GenerationError::UnmatchedPathPlaceholder {
                    placeholder: placeholder.clone(),
                }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if !segments.is_empty() {
        calls.push(BuilderCall::Path(segments));
    }

    calls.extend(
        request
            .request_parameters()
            .filter(|param| param.role == Role::Matrix)
            .map(|param| BuilderCall::Matrix {
                key: param.binding.clone(),
                argument: param.name.clone(),
            }),
    );

    if !request.produces.is_empty() {
        calls.push(BuilderCall::Produces(request.produces.clone()));
    }
    if !request.consumes.is_empty() {
        calls.push(BuilderCall::Consumes(request.consumes.clone()));
    }

    for param in request.request_parameters() {
        let key = param.binding.clone();
        let argument = param.name.clone();
        let call = match param.role {
            Role::Query => BuilderCall::Param { key, argument },
            Role::Header => BuilderCall::Header { key, argument },
            Role::Form => BuilderCall::Form { key, argument },
            Role::Cookie => BuilderCall::Cookie { key, argument },
            Role::Body => BuilderCall::Data(argument),
            Role::Path | Role::Matrix | Role::Callback => continue,
        };
        calls.push(call);
    }

    let (callback, error_callback) = match style {
        ServiceStyle::Sync => (ON_DONE.to_string(), ON_ERROR.to_string()),
        ServiceStyle::Callback => {
            let mut callbacks = request
                .parameters
                .iter()
                .filter(|param| param.role == Role::Callback)
                .map(|param| param.name.clone());
            match (callbacks.next(), callbacks.next()) {
                (Some(callback), Some(error_callback)) => (callback, error_callback),
                _ => return Err(GenerationError::MissingCallbackParameter),
            }
        }
    };
    calls.push(BuilderCall::Execute {
        callback,
        error_callback,
    });

    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Binding, MethodDescriptor, ParamDescriptor};

    fn todo_service(style: ServiceStyle, methods: Vec<MethodDescriptor>) -> ServiceDescriptor {
        ServiceDescriptor {
            name: "ToDoService".to_string(),
            path: "/service/todo".to_string(),
            style,
            produces: vec![],
            consumes: vec![],
            methods,
        }
    }

    fn delete_to_do() -> MethodDescriptor {
        MethodDescriptor {
            name: "deleteToDo".to_string(),
            verb: Some("DELETE".to_string()),
            path: Some("/delete/{id}".to_string()),
            params: vec![ParamDescriptor::new("id", "u32").with_role(Binding::Path)],
            ..Default::default()
        }
    }

    #[test]
    fn should_lower_path_placeholder() {
        let service = todo_service(ServiceStyle::Sync, vec![delete_to_do()]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert!(diagnostics.is_empty());
        assert_eq!(client.type_name, "ToDoServiceClient");
        assert_eq!(
            client.methods[0].body,
            MethodBody::Chain(vec![
                BuilderCall::Request(Method::DELETE),
                BuilderCall::Path(vec![
                    PathSegment::Literal("delete".to_string()),
                    PathSegment::Argument("id".to_string()),
                ]),
                BuilderCall::Execute {
                    callback: "on_done".to_string(),
                    error_callback: "on_error".to_string(),
                },
            ])
        );
    }

    #[test]
    fn should_synthesize_multiple_result_callback() {
        let method = MethodDescriptor {
            name: "searchToDos".to_string(),
            params: vec![
                ParamDescriptor::new("arg0", "String").with_role(Binding::Query),
                ParamDescriptor::new("arg1", "String").with_role(Binding::Header),
            ],
            returns: Some("List<ToDo>".to_string()),
            ..Default::default()
        };
        let service = todo_service(ServiceStyle::Sync, vec![method]);

        let (client, _) = ClientGenerator::default().generate_service(&service);

        assert_eq!(
            client.methods[0].arguments,
            vec![
                Argument::new("arg0", ArgumentType::Declared("String".to_string())),
                Argument::new("arg1", ArgumentType::Declared("String".to_string())),
                Argument::new(
                    "on_done",
                    ArgumentType::Result(ReturnShape::Collection("ToDo".to_string()))
                ),
                Argument::new("on_error", ArgumentType::Error),
            ]
        );
    }

    #[test]
    fn should_keep_parameter_order() {
        let method = MethodDescriptor {
            name: "updateToDo".to_string(),
            verb: Some("PUT".to_string()),
            path: Some("/update/{id}".to_string()),
            consumes: Some(vec!["application/json".to_string()]),
            params: vec![
                ParamDescriptor::new("version", "u32").with_role(Binding::Matrix),
                ParamDescriptor::new("token", "String")
                    .with_role(Binding::Header)
                    .with_key("X-Token"),
                ParamDescriptor::new("todo", "ToDo"),
                ParamDescriptor::new("id", "u32").with_role(Binding::Path),
                ParamDescriptor::new("session", "String").with_role(Binding::Cookie),
                ParamDescriptor::new("dryRun", "bool")
                    .with_role(Binding::Query)
                    .with_key("dry-run"),
            ],
            ..Default::default()
        };
        let service = todo_service(ServiceStyle::Sync, vec![method]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert!(diagnostics.is_empty());
        let MethodBody::Chain(calls) = &client.methods[0].body else {
            panic!("expected a call chain");
        };
        assert_eq!(
            calls,
            &vec![
                BuilderCall::Request(Method::PUT),
                BuilderCall::Path(vec![
                    PathSegment::Literal("update".to_string()),
                    PathSegment::Argument("id".to_string()),
                ]),
                BuilderCall::Matrix {
                    key: "version".to_string(),
                    argument: "version".to_string(),
                },
                BuilderCall::Consumes(vec!["application/json".to_string()]),
                BuilderCall::Header {
                    key: "X-Token".to_string(),
                    argument: "token".to_string(),
                },
                BuilderCall::Data("todo".to_string()),
                BuilderCall::Cookie {
                    key: "session".to_string(),
                    argument: "session".to_string(),
                },
                BuilderCall::Param {
                    key: "dry-run".to_string(),
                    argument: "dry_run".to_string(),
                },
                BuilderCall::Execute {
                    callback: "on_done".to_string(),
                    error_callback: "on_error".to_string(),
                },
            ]
        );
    }

    #[test]
    fn should_use_declared_callbacks() {
        let method = MethodDescriptor {
            name: "storeTodo".to_string(),
            verb: Some("POST".to_string()),
            path: Some("todo/store".to_string()),
            params: vec![
                ParamDescriptor::new("todo", "ToDo"),
                ParamDescriptor::new("callback", "RawText"),
                ParamDescriptor::new("errorCallback", "ErrorCallback"),
            ],
            ..Default::default()
        };
        let service = todo_service(ServiceStyle::Callback, vec![method]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert!(diagnostics.is_empty());
        let method = &client.methods[0];
        assert_eq!(
            method.arguments,
            vec![
                Argument::new("todo", ArgumentType::Declared("ToDo".to_string())),
                Argument::new("callback", ArgumentType::Result(ReturnShape::Text)),
                Argument::new("error_callback", ArgumentType::Error),
            ]
        );
        let MethodBody::Chain(calls) = &method.body else {
            panic!("expected a call chain");
        };
        assert_eq!(
            calls.last(),
            Some(&BuilderCall::Execute {
                callback: "callback".to_string(),
                error_callback: "error_callback".to_string(),
            })
        );
    }

    #[test]
    fn should_generate_unsupported_body_for_incompatible_method() {
        let method = MethodDescriptor {
            name: "exportAll".to_string(),
            incompatible: Some(r#"deprecated(note = "server only")"#.to_string()),
            ..Default::default()
        };
        let service = todo_service(ServiceStyle::Sync, vec![method]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert!(diagnostics.is_empty());
        let method = &client.methods[0];
        assert_eq!(method.body, MethodBody::Unsupported);
        assert_eq!(
            method.marker.as_deref(),
            Some(r#"deprecated(note = "server only")"#)
        );
        assert_eq!(method.arguments.len(), 2);
    }

    #[test]
    fn should_keep_sibling_methods_on_failure() {
        let broken = MethodDescriptor {
            name: "getToDo".to_string(),
            path: Some("/{id}".to_string()),
            ..Default::default()
        };
        let service = todo_service(ServiceStyle::Sync, vec![broken, delete_to_do()]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        let names = client
            .methods
            .iter()
            .map(|method| method.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["delete_to_do"]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                service: "ToDoService".to_string(),
                method: "getToDo".to_string(),
                error: GenerationError::UnmatchedPathPlaceholder {
                    placeholder: "id".to_string(),
                },
            }]
        );
    }

    #[test]
    fn should_report_duplicate_methods() {
        let mut duplicate = delete_to_do();
        duplicate.name = "delete_to_do".to_string();
        let service = todo_service(ServiceStyle::Sync, vec![delete_to_do(), duplicate]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert_eq!(client.methods.len(), 1);
        assert_eq!(
            diagnostics[0].error,
            GenerationError::DuplicateMethod {
                name: "delete_to_do".to_string(),
            }
        );
    }

    #[test]
    fn should_apply_config() {
        let config = GeneratorConfig::default()
            .with_crate_path("::restling_core")
            .with_type_suffix("Rest");
        let service = todo_service(ServiceStyle::Sync, vec![]);

        let (client, _) = ClientGenerator::new(config).generate_service(&service);

        assert_eq!(client.type_name, "ToDoServiceRest");
    }

    fn generate_one(
        style: ServiceStyle,
        method: MethodDescriptor,
    ) -> Result<GeneratedMethod, GenerationError> {
        let service = todo_service(style, vec![method]);
        let (mut client, mut diagnostics) = ClientGenerator::default().generate_service(&service);
        match diagnostics.pop() {
            Some(diagnostic) => Err(diagnostic.error),
            None => Ok(client.methods.remove(0)),
        }
    }

    fn search(params: Vec<ParamDescriptor>) -> MethodDescriptor {
        MethodDescriptor {
            name: "searchToDos".to_string(),
            params,
            returns: Some("Vec<ToDo>".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn should_report_signatures_that_would_not_compile() {
        let method = search(vec![
            ParamDescriptor::new("onError", "String").with_role(Binding::Query),
            ParamDescriptor::new("gen", "u32").with_role(Binding::Header),
            ParamDescriptor::new("todo", "Vec<ToDo"),
        ]);
        let service = todo_service(ServiceStyle::Sync, vec![method]);

        let (client, diagnostics) = ClientGenerator::default().generate_service(&service);

        assert!(client.methods.is_empty());
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                service: "ToDoService".to_string(),
                method: "searchToDos".to_string(),
                error: GenerationError::ReservedArgument {
                    name: "on_error".to_string(),
                },
            }]
        );
    }

    #[rstest::rstest]
    #[case::on_done("onDone", "on_done")]
    #[case::on_error("on_error", "on_error")]
    fn should_reserve_callback_argument_names(#[case] param: &str, #[case] name: &str) {
        let method = search(vec![
            ParamDescriptor::new(param, "String").with_role(Binding::Query),
        ]);

        let result = generate_one(ServiceStyle::Sync, method);

        assert_eq!(
            result,
            Err(GenerationError::ReservedArgument {
                name: name.to_string()
            })
        );
    }

    #[test]
    fn should_allow_callback_names_on_callback_style() {
        let method = MethodDescriptor {
            name: "storeTodo".to_string(),
            verb: Some("POST".to_string()),
            params: vec![
                ParamDescriptor::new("todo", "ToDo"),
                ParamDescriptor::new("onDone", "Completable"),
                ParamDescriptor::new("onError", "ErrorCallback"),
            ],
            ..Default::default()
        };

        let result = generate_one(ServiceStyle::Callback, method);

        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn should_reject_duplicate_arguments() {
        let method = search(vec![
            ParamDescriptor::new("toDo", "ToDo"),
            ParamDescriptor::new("to_do", "String").with_role(Binding::Query),
        ]);

        let result = generate_one(ServiceStyle::Sync, method);

        assert_eq!(
            result,
            Err(GenerationError::DuplicateArgument {
                name: "to_do".to_string()
            })
        );
    }

    #[test]
    fn should_reject_reserved_identifiers() {
        let method = search(vec![
            ParamDescriptor::new("self", "String").with_role(Binding::Query),
        ]);

        let result = generate_one(ServiceStyle::Sync, method);

        assert_eq!(
            result,
            Err(GenerationError::ReservedIdentifier {
                name: "self".to_string()
            })
        );
    }

    #[test]
    fn should_reject_invalid_identifiers() {
        let method = search(vec![
            ParamDescriptor::new("2fa", "String").with_role(Binding::Query),
        ]);

        let result = generate_one(ServiceStyle::Sync, method);

        assert_eq!(
            result,
            Err(GenerationError::InvalidIdentifier {
                name: "2fa".to_string()
            })
        );
    }

    #[test]
    fn should_escape_keyword_arguments() -> anyhow::Result<()> {
        let method = search(vec![ParamDescriptor::new("gen", "u32").with_role(Binding::Header)]);

        let method = generate_one(ServiceStyle::Sync, method)?;

        assert_eq!(method.arguments[0].name, "gen");
        Ok(())
    }

    #[rstest::rstest]
    #[case::declared(vec![ParamDescriptor::new("todo", "Vec<ToDo")], None)]
    #[case::returned(vec![], Some("Vec<ToDo"))]
    fn should_reject_invalid_types(
        #[case] params: Vec<ParamDescriptor>,
        #[case] returns: Option<&str>,
    ) {
        let method = MethodDescriptor {
            returns: returns.map(str::to_string),
            ..search(params)
        };

        let result = generate_one(ServiceStyle::Sync, method);

        assert!(
            matches!(&result, Err(GenerationError::InvalidType { ty, .. }) if ty == "Vec<ToDo"),
            "{result:?}"
        );
    }

    #[test]
    fn should_reject_invalid_marker() {
        let method = MethodDescriptor {
            name: "exportAll".to_string(),
            incompatible: Some("deprecated(".to_string()),
            ..Default::default()
        };

        let result = generate_one(ServiceStyle::Sync, method);

        assert!(
            matches!(&result, Err(GenerationError::InvalidAttribute { attribute, .. }) if attribute == "deprecated("),
            "{result:?}"
        );
    }
}

//! # Restling Codegen
//!
//! Generates REST clients on top of `restling-core` from declarative service
//! descriptors.
//!
//! A descriptor lists services (a name, a root path, a style) and their methods
//! (a verb, a path template, parameters bound to a request role, a return type).
//! Each method is classified into a [`RequestDescriptor`], then lowered into a
//! chain of `RequestBuilder` calls and rendered as Rust source.
//!
//! ## Usage from a build script
//!
//! ```rust,no_run
//! use restling_codegen::{ApiDescriptor, ClientGenerator, GeneratorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiDescriptor::from_path("todo.yml")?;
//! let generation = ClientGenerator::new(GeneratorConfig::default()).generate(&api);
//! for diagnostic in &generation.diagnostics {
//!     println!("cargo::warning={diagnostic}");
//! }
//!
//! let out_dir = std::env::var("OUT_DIR")?;
//! std::fs::write(format!("{out_dir}/todo_client.rs"), generation.source().render()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! The generated file is then included in the crate:
//!
//! ```rust,ignore
//! include!(concat!(env!("OUT_DIR"), "/todo_client.rs"));
//! ```
//!
//! ## Parameter roles
//!
//! | Role | Generated call |
//! |------|----------------|
//! | `path` | fills the `{name}` placeholder of the path template |
//! | `query` | `.param(key, &value)` |
//! | `header` | `.header(key, &value)` |
//! | `form` | `.form(key, &value)` |
//! | `cookie` | `.cookie(key, &value)` |
//! | `matrix` | `.matrix(key, &value)` on the last path segment |
//! | none | the body: `.data(&value)`, at most one per method |
//!
//! ## Styles
//!
//! Sync-style methods declare a return type. The generated method takes the
//! matching result callback and an `ErrorCallback` as two extra arguments:
//!
//! | Return type | Result callback |
//! |-------------|-----------------|
//! | none, `()` | `Completable` |
//! | `String` | `RawText` |
//! | `Vec<T>`, `List<T>`, `Collection<T>` | `MultipleResult<T>` |
//! | anything else | `SingleResult<T>` |
//!
//! Callback-style methods already end with a result callback and an
//! `ErrorCallback`; they are kept as declared.
//!
//! ## Diagnostics
//!
//! A method that cannot be generated (unmatched path placeholder, several body
//! parameters, missing callbacks, a name or type that is not valid Rust...) is reported as a [`Diagnostic`] and left
//! out of its client. Its sibling methods are still generated.

mod descriptor;
pub use self::descriptor::{
    ApiDescriptor, Binding, MethodDescriptor, ParamDescriptor, ServiceDescriptor, ServiceStyle,
};

mod error;
pub use self::error::{DescriptorError, Diagnostic, GenerationError};

mod path;
pub use self::path::{PathTemplate, TemplateSegment};

mod request;
pub use self::request::{Parameter, RequestDescriptor, ReturnShape, Role};

mod syntax;

mod generator;
pub use self::generator::{
    Argument, ArgumentType, BuilderCall, ClientGenerator, GeneratedClient, GeneratedMethod,
    Generation, GeneratorConfig, MethodBody, PathSegment,
};

mod render;
pub use self::render::RustSource;

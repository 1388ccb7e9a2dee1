use http::Method;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::GenerationError;
use crate::generator::{
    Argument, ArgumentType, BuilderCall, GeneratedClient, GeneratedMethod, GeneratorConfig,
    MethodBody, PathSegment,
};
use crate::request::ReturnShape;
use crate::syntax::{rust_ident, rust_meta, rust_path, rust_type};

const HEADER: &str = "// @generated by restling-codegen, do not edit.";

/// Rust source of generated clients.
///
/// The clients are built as tokens, checked with `syn` and formatted with
/// `prettyplease`. The output holds items only (no inner attributes), so it
/// can be `include!`d into any module.
#[derive(Debug, Clone, Copy)]
pub struct RustSource<'a> {
    config: &'a GeneratorConfig,
    clients: &'a [GeneratedClient],
}

impl<'a> RustSource<'a> {
    /// Wraps the clients to render.
    pub fn new(config: &'a GeneratorConfig, clients: &'a [GeneratedClient]) -> Self {
        Self { config, clients }
    }

    /// The generated items, as tokens.
    ///
    /// # Errors
    ///
    /// Fails when a name, type, marker or the crate path is not valid Rust.
    pub fn tokens(&self) -> Result<TokenStream, GenerationError> {
        let krate = rust_path(self.config.crate_path())?;
        let clients = self
            .clients
            .iter()
            .map(|client| client_tokens(&krate, client))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote! { #(#clients)* })
    }

    /// The generated items, parsed.
    pub fn file(&self) -> Result<syn::File, GenerationError> {
        syn::parse2(self.tokens()?).map_err(|error| GenerationError::InvalidSource {
            message: error.to_string(),
        })
    }

    /// The formatted source, starting with a `@generated` marker.
    pub fn render(&self) -> Result<String, GenerationError> {
        let file = self.file()?;
        Ok(format!("{HEADER}\n\n{}", prettyplease::unparse(&file)))
    }
}

fn client_tokens(
    krate: &syn::Path,
    client: &GeneratedClient,
) -> Result<TokenStream, GenerationError> {
    let name = rust_ident(&client.type_name)?;
    let doc = format!(" REST client of the `{}` service.", client.service);
    let root_path = &client.root_path;
    let methods = client
        .methods
        .iter()
        .map(|method| method_tokens(krate, method))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #name<X> {
            client: #krate::RestClient<X>,
        }

        impl<X> #name<X>
        where
            X: #krate::Transport,
        {
            /// Root path of the service.
            pub const ROOT_PATH: &str = #root_path;

            /// Creates a client of the service under `base_url`.
            pub fn new(base_url: impl Into<String>, transport: X) -> Self {
                Self {
                    client: #krate::RestClient::new(base_url, Self::ROOT_PATH, transport),
                }
            }

            #(#methods)*
        }
    })
}

fn method_tokens(
    krate: &syn::Path,
    method: &GeneratedMethod,
) -> Result<TokenStream, GenerationError> {
    let name = rust_ident(&method.name)?;
    let doc = match &method.body {
        MethodBody::Unsupported => " Not available: always fails.".to_string(),
        MethodBody::Chain(_) => format!(" `{} {}`", method.http_method, method.path),
    };
    let marker = method
        .marker
        .as_deref()
        .map(rust_meta)
        .transpose()?
        .map(|meta| quote! { #[#meta] });
    let allow = (method.body == MethodBody::Unsupported)
        .then(|| quote! { #[allow(unused_variables)] });

    let arguments = method
        .arguments
        .iter()
        .map(|Argument { name, ty }| {
            let name = rust_ident(name)?;
            let ty = argument_type(krate, ty)?;
            Ok(quote! { #name: #ty })
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    let body = match &method.body {
        MethodBody::Unsupported => {
            let operation = &method.name;
            quote! {
                Err(#krate::RestClientError::UnsupportedOperation {
                    operation: #operation.to_string(),
                })
            }
        }
        MethodBody::Chain(calls) => {
            let calls = calls
                .iter()
                .map(|call| builder_call(krate, call))
                .collect::<Result<Vec<_>, _>>()?;
            quote! {
                self.client #(#calls)* .await;
                Ok(())
            }
        }
    };

    Ok(quote! {
        #[doc = #doc]
        #marker
        #allow
        pub async fn #name(&self, #(#arguments),*) -> Result<(), #krate::RestClientError> {
            #body
        }
    })
}

fn argument_type(krate: &syn::Path, ty: &ArgumentType) -> Result<TokenStream, GenerationError> {
    let tokens = match ty {
        ArgumentType::Declared(ty) => {
            let ty = rust_type(ty)?;
            quote! { #ty }
        }
        ArgumentType::Result(ReturnShape::Void) => quote! { #krate::Completable },
        ArgumentType::Result(ReturnShape::Text) => quote! { #krate::RawText },
        ArgumentType::Result(ReturnShape::Collection(item)) => {
            let item = rust_type(item)?;
            quote! { #krate::MultipleResult<#item> }
        }
        ArgumentType::Result(ReturnShape::Single(item)) => {
            let item = rust_type(item)?;
            quote! { #krate::SingleResult<#item> }
        }
        ArgumentType::Error => quote! { #krate::ErrorCallback },
    };
    Ok(tokens)
}

fn builder_call(krate: &syn::Path, call: &BuilderCall) -> Result<TokenStream, GenerationError> {
    let tokens = match call {
        BuilderCall::Request(method) => match standard_method(method) {
            Some(constant) => {
                let constant = format_ident!("{constant}");
                quote! { .request(#krate::Method::#constant) }
            }
            None => {
                let verb = method.as_str();
                quote! { .request(#krate::Method::GET).custom_method(#verb)? }
            }
        },
        BuilderCall::Path(segments) => {
            let segments = segments
                .iter()
                .map(|segment| match segment {
                    PathSegment::Literal(literal) => Ok(quote! { #literal.to_string() }),
                    PathSegment::Argument(argument) => {
                        let argument = rust_ident(argument)?;
                        Ok(quote! { #argument.to_string() })
                    }
                })
                .collect::<Result<Vec<_>, GenerationError>>()?;
            quote! { .path([#(#segments),*])? }
        }
        BuilderCall::Matrix { key, argument } => keyed_call("matrix", key, argument)?,
        BuilderCall::Produces(media_types) => quote! { .produces([#(#media_types),*]) },
        BuilderCall::Consumes(media_types) => quote! { .consumes([#(#media_types),*]) },
        BuilderCall::Param { key, argument } => keyed_call("param", key, argument)?,
        BuilderCall::Header { key, argument } => keyed_call("header", key, argument)?,
        BuilderCall::Form { key, argument } => keyed_call("form", key, argument)?,
        BuilderCall::Cookie { key, argument } => keyed_call("cookie", key, argument)?,
        BuilderCall::Data(argument) => {
            let argument = rust_ident(argument)?;
            quote! { .data(&#argument)? }
        }
        BuilderCall::Execute {
            callback,
            error_callback,
        } => {
            let callback = rust_ident(callback)?;
            let error_callback = rust_ident(error_callback)?;
            quote! { .execute(self.client.transport(), #callback, #error_callback) }
        }
    };
    Ok(tokens)
}

/// `.{method}("key", &argument)?`
fn keyed_call(method: &str, key: &str, argument: &str) -> Result<TokenStream, GenerationError> {
    let method = format_ident!("{method}");
    let argument = rust_ident(argument)?;
    Ok(quote! { .#method(#key, &#argument)? })
}

const STANDARD_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH", "TRACE", "CONNECT",
];

/// The `http::Method` constant name, `None` for an extension verb.
fn standard_method(method: &Method) -> Option<&'static str> {
    STANDARD_METHODS
        .into_iter()
        .find(|constant| *constant == method.as_str())
}

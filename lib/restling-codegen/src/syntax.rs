use proc_macro2::{Ident, Span};

use crate::GenerationError;

/// Keywords emitted as raw identifiers (`r#type`), edition 2024 included.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Builds the identifier for a generated name, raw when it is a keyword.
pub(crate) fn rust_ident(name: &str) -> Result<Ident, GenerationError> {
    if RESERVED.contains(&name) {
        return Err(GenerationError::ReservedIdentifier {
            name: name.to_string(),
        });
    }
    if KEYWORDS.contains(&name) {
        return Ok(Ident::new_raw(name, Span::call_site()));
    }
    syn::parse_str::<Ident>(name).map_err(|_| GenerationError::InvalidIdentifier {
        name: name.to_string(),
    })
}

/// Parses a declared Rust type.
pub(crate) fn rust_type(ty: &str) -> Result<syn::Type, GenerationError> {
    syn::parse_str(ty).map_err(|error| GenerationError::InvalidType {
        ty: ty.to_string(),
        message: error.to_string(),
    })
}

/// Parses an attribute body, e.g. `deprecated(note = "...")`.
pub(crate) fn rust_meta(attribute: &str) -> Result<syn::Meta, GenerationError> {
    syn::parse_str(attribute).map_err(|error| GenerationError::InvalidAttribute {
        attribute: attribute.to_string(),
        message: error.to_string(),
    })
}

/// Parses the runtime crate path, e.g. `::restling_core`.
pub(crate) fn rust_path(path: &str) -> Result<syn::Path, GenerationError> {
    syn::parse_str(path).map_err(|_| GenerationError::InvalidCratePath {
        path: path.to_string(),
    })
}

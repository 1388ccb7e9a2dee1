use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

use crate::GenerationError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{(?<name>\w+)}$").expect("a valid regex"));

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// A literal segment, e.g. `delete`.
    Literal(String),
    /// A `{name}` placeholder.
    Placeholder(String),
}

/// A path template split into segments, e.g. `/delete/{id}`.
///
/// Empty segments are discarded: `/list`, `list/` and `//list` are the same template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<TemplateSegment>,
}

impl PathTemplate {
    /// Parses a path template.
    ///
    /// # Errors
    ///
    /// A segment holding a brace without being a whole `{name}` placeholder
    /// (e.g. `v{version}`) cannot be bound and fails with
    /// [`GenerationError::UnmatchedPathPlaceholder`].
    pub fn parse(template: &str) -> Result<Self, GenerationError> {
        let segments = template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                if let Some(caps) = PLACEHOLDER.captures(segment) {
                    Ok(TemplateSegment::Placeholder(caps["name"].to_string()))
                } else if segment.contains(['{', '}']) {
                    Err(GenerationError::UnmatchedPathPlaceholder {
                        placeholder: segment.to_string(),
                    })
                } else {
                    Ok(TemplateSegment::Literal(segment.to_string()))
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { segments })
    }

    /// The segments, in order.
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// The placeholder names, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Placeholder(name) => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(literal) => write!(f, "/{literal}")?,
                TemplateSegment::Placeholder(name) => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}

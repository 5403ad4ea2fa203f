//! Errors raised while registering templates or rendering URLs.

use std::fmt;

/// Errors that can occur when inserting a path template into a tree.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// The template needs a parameter edge that is already occupied by an
    /// incompatible one (different name, converter, or fused suffix).
    Conflict {
        /// The parameter edge the insertion is conflicting with.
        with: String,
    },
    /// Only one parameter per path segment is allowed.
    TooManyParams,
    /// Parameters must be registered with a name.
    UnnamedParam,
    /// A `{` placeholder was never closed with `}`.
    UnclosedParam,
    /// Path templates must begin with `/`.
    MissingLeadingSlash,
    /// The declared converter tag has not been registered.
    UnknownConverter {
        /// The unrecognized tag.
        tag: String,
    },
    /// `path` captures consume the rest of the path and are therefore only
    /// allowed as the final component of a template.
    InvalidTail,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion conflicts with previously registered parameter {with}"
                )
            }
            Self::TooManyParams => write!(f, "only one parameter is allowed per path segment"),
            Self::UnnamedParam => write!(f, "parameters must be registered with a name"),
            Self::UnclosedParam => write!(f, "unmatched '{{' in path template"),
            Self::MissingLeadingSlash => write!(f, "path templates must begin with '/'"),
            Self::UnknownConverter { tag } => {
                write!(f, "no converter registered for type \"{tag}\"")
            }
            Self::InvalidTail => {
                write!(f, "path captures are only allowed at the end of a template")
            }
        }
    }
}

impl std::error::Error for InsertError {}

/// A failed attempt to render a template back into a concrete URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RenderError {
    /// A placeholder had no usable value in the supplied parameters.
    MissingParameter {
        /// Name of the placeholder that could not be filled.
        name: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter { name } => {
                write!(f, "no usable value supplied for parameter \"{name}\"")
            }
        }
    }
}

impl std::error::Error for RenderError {}

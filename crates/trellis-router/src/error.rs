//! Error types for route registration.

use thiserror::Error;

/// Errors raised while registering a route pattern.
///
/// Lookups never fail; a path that matches nothing is an ordinary
/// no-match, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A `:` or `*` token with no name, e.g. `/users/:`.
    #[error("pattern `{pattern}`: capture token is missing a name")]
    MissingCaptureName { pattern: String },

    /// A capture name containing one of the reserved bytes `:` or `*`.
    #[error("pattern `{pattern}`: capture name `{name}` contains a reserved character")]
    InvalidCaptureName { pattern: String, name: String },

    /// A wildcard token followed by more pattern text.
    #[error("pattern `{pattern}`: wildcard `*{name}` must be the final token")]
    WildcardNotLast { pattern: String, name: String },

    /// A parameter registered where a differently-named parameter already
    /// branches.
    #[error(
        "pattern `{pattern}`: parameter `:{found}` conflicts with `:{existing}` \
         already registered at the same position"
    )]
    ParameterConflict {
        pattern: String,
        existing: String,
        found: String,
    },

    /// A wildcard registered where a differently-named wildcard already
    /// branches.
    #[error(
        "pattern `{pattern}`: wildcard `*{found}` conflicts with `*{existing}` \
         already registered at the same position"
    )]
    WildcardConflict {
        pattern: String,
        existing: String,
        found: String,
    },

    /// Two patterns whose common prefix ends in the middle of a multi-byte
    /// character. Node prefixes split only at character boundaries, so such
    /// a pair cannot keep first-byte dispatch unambiguous.
    #[error("pattern `{pattern}` diverges from an existing route inside a multi-byte character")]
    SplitInsideCharacter { pattern: String },

    /// A method string that names no known HTTP method.
    #[error("unknown HTTP method `{0}`")]
    UnknownMethod(String),
}

/// Result type alias for registration operations.
pub type Result<T> = std::result::Result<T, RouterError>;

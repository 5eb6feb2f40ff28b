//! Error types for route registration and url construction.
//!
//! Two failure families exist, mirroring the two phases of the router's
//! lifecycle:
//!
//! - [`RouteConfigError`] - raised while registering templates. These are
//!   programming errors in the route table itself and must be fixed before
//!   the application can proceed.
//! - [`UrlBuildError`] - raised while rendering a url from a registered
//!   template with caller-supplied parameter values.
//!
//! Failing to resolve a navigation path is *not* an error: `resolve` returns
//! `None` for an unmatched path.

use thiserror::Error;

/// A route template could not be added to the route table.
#[derive(Debug, Error)]
pub enum RouteConfigError {
    /// Two targets were registered on the exact same template.
    #[error("navigation targets must have unique routes, found targets '{existing}' and '{proposed}' with the same route")]
    AmbiguousRoute {
        /// Name of the target already registered on the route.
        existing: String,
        /// Name of the target being registered.
        proposed: String,
    },

    /// Two targets were registered on the exact same parameterized template.
    #[error("navigation targets must have unique routes, found targets '{existing}' and '{proposed}' with parameter sharing the same route")]
    AmbiguousParameterRoute {
        existing: String,
        proposed: String,
    },

    /// A trailing optional parameter can never be absent because the route
    /// without it already resolves to another target.
    #[error("navigation targets '{other}' and '{optional}' have the same route and '{optional}' has an optional parameter that will never be used as optional")]
    UnreachableOptional {
        /// Name of the target owning the optional-parameter template.
        optional: String,
        /// Name of the target registered on the shorter route.
        other: String,
    },

    /// A varargs parameter appeared before the final segment of a template.
    #[error("a varargs url parameter may be defined only as the last path segment")]
    VarargsNotLast,

    /// A parameter constraint failed to compile as a regular expression.
    #[error("invalid constraint regex `{pattern}` in route template")]
    InvalidConstraint {
        /// The constraint token as written.
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A url could not be rendered from a template and parameter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlBuildError {
    /// The template was never registered in the route table.
    #[error("unregistered path template `{0}`")]
    UnregisteredTemplate(String),

    /// A mandatory parameter has no value in the provided source.
    #[error("url parameter `{0}` is mandatory but missing from the provided parameters")]
    MissingParameter(String),

    /// A provided value does not satisfy the parameter's constraint.
    #[error("url parameter `{name}` has value `{value}`, which is invalid according to the parameter definition `{pattern}`")]
    IneligibleValue {
        name: String,
        value: String,
        /// The segment pattern the parameter was declared with.
        pattern: String,
    },
}

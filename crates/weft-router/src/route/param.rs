//! Segment pattern parsing for url parameters.
//!
//! A template segment names a parameter with a leading `:`. The full grammar,
//! processed outside-in:
//!
//! - `[` `]` - enclosing brackets mark the parameter optional
//! - `...` - a leading ellipsis marks the parameter varargs (it then matches
//!   all remaining path segments and must be the last template segment)
//! - `:name` or `:name:constraint` - the parameter name, optionally followed
//!   by a constraint token (a primitive type or a regular expression)
//!
//! So `[:id:int]` is an optional integer parameter named `id`, and
//! `...:rest:[a-z]+` is a varargs parameter whose every element must be
//! lowercase ascii.

use crate::constraint::ParameterConstraint;
use crate::error::RouteConfigError;

/// Whether a raw segment pattern declares a parameter at all.
pub(crate) fn is_parameter_pattern(pattern: &str) -> bool {
    pattern.contains(':')
}

/// Whether a raw segment pattern declares a varargs parameter.
pub(crate) fn is_varargs_pattern(pattern: &str) -> bool {
    pattern.starts_with("...:")
}

/// Whether a raw segment pattern declares an optional parameter.
pub(crate) fn is_optional_pattern(pattern: &str) -> bool {
    pattern.starts_with("[:")
}

/// Parsed specification of a single url parameter.
///
/// Constructed once when a segment pattern is first inserted into the tree
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    name: String,
    constraint: ParameterConstraint,
    optional: bool,
    varargs: bool,
}

impl ParamDescriptor {
    /// Parses a raw segment pattern into a descriptor.
    ///
    /// Never fails on shape: an unrecognized constraint token is compiled as
    /// a regular expression, and only a regex compile failure is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_router::ParamDescriptor;
    ///
    /// let id = ParamDescriptor::parse(":id:int").unwrap();
    /// assert_eq!(id.name(), "id");
    /// assert!(id.is_mandatory());
    ///
    /// let rest = ParamDescriptor::parse("[...:rest]").unwrap();
    /// assert!(rest.is_varargs());
    /// assert!(rest.is_optional());
    /// ```
    pub fn parse(segment_pattern: &str) -> Result<Self, RouteConfigError> {
        let mut rest = segment_pattern;

        let optional = rest.starts_with('[') && rest.ends_with(']');
        if optional {
            rest = &rest[1..rest.len() - 1];
        }

        let varargs = rest.starts_with("...");
        if varargs {
            rest = &rest[3..];
        }

        // The leading `:` marks the segment as a parameter.
        rest = rest.strip_prefix(':').unwrap_or(rest);

        let (name, constraint) = match rest.split_once(':') {
            Some((name, token)) => (name, ParameterConstraint::parse(token)?),
            None => (rest, ParameterConstraint::String),
        };

        Ok(Self {
            name: name.to_string(),
            constraint,
            optional,
            varargs,
        })
    }

    /// The parameter name, used as the key for extracted values.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value constraint.
    pub fn constraint(&self) -> &ParameterConstraint {
        &self.constraint
    }

    /// Whether the parameter was enclosed in `[` `]`.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the parameter captures all remaining path segments.
    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    /// Whether a value must be supplied when building a url.
    ///
    /// Varargs parameters are never mandatory: an empty list is a valid
    /// match.
    pub fn is_mandatory(&self) -> bool {
        !self.optional && !self.varargs
    }

    /// Whether `value` satisfies the parameter's constraint.
    pub fn is_eligible(&self, value: &str) -> bool {
        self.constraint.is_eligible(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_parameter_defaults_to_string() {
        let descriptor = ParamDescriptor::parse(":slug").unwrap();
        assert_eq!(descriptor.name(), "slug");
        assert_eq!(descriptor.constraint(), &ParameterConstraint::String);
        assert!(descriptor.is_mandatory());
        assert!(!descriptor.is_varargs());
    }

    #[test]
    fn test_typed_parameter() {
        let descriptor = ParamDescriptor::parse(":id:long").unwrap();
        assert_eq!(descriptor.name(), "id");
        assert_eq!(descriptor.constraint(), &ParameterConstraint::Long);
    }

    #[test]
    fn test_optional_parameter() {
        let descriptor = ParamDescriptor::parse("[:id:int]").unwrap();
        assert!(descriptor.is_optional());
        assert!(!descriptor.is_varargs());
        assert!(!descriptor.is_mandatory());
    }

    #[test]
    fn test_varargs_parameter() {
        let descriptor = ParamDescriptor::parse("...:rest").unwrap();
        assert!(descriptor.is_varargs());
        assert!(!descriptor.is_optional());
        assert!(!descriptor.is_mandatory());
    }

    #[test]
    fn test_bracketed_varargs_is_both() {
        let descriptor = ParamDescriptor::parse("[...:rest]").unwrap();
        assert!(descriptor.is_varargs());
        assert!(descriptor.is_optional());
    }

    #[test]
    fn test_regex_constraint() {
        let descriptor = ParamDescriptor::parse(":code:[a-z]{2}").unwrap();
        assert!(descriptor.is_eligible("fr"));
        assert!(!descriptor.is_eligible("FRA"));
    }

    #[test]
    fn test_bad_regex_propagates() {
        assert!(ParamDescriptor::parse(":x:(unclosed").is_err());
    }

    #[test]
    fn test_pattern_classification() {
        assert!(is_parameter_pattern(":id"));
        assert!(is_parameter_pattern("[:id]"));
        assert!(!is_parameter_pattern("users"));

        assert!(is_varargs_pattern("...:rest"));
        assert!(!is_varargs_pattern("[...:rest]")); // bracketed varargs files under parameters

        assert!(is_optional_pattern("[:id]"));
        assert!(!is_optional_pattern(":id"));
    }
}

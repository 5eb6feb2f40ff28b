//! Typed value constraints for url parameters.
//!
//! A parameter segment may restrict the values it accepts, either with one of
//! the primitive type tokens (`int`, `long`, `bool`/`boolean`, `string`) or
//! with an arbitrary regular expression. Regular expressions are compiled
//! eagerly when the route template is registered, so a malformed pattern
//! surfaces as a configuration error instead of failing at resolution time.

use std::fmt;

use regex::Regex;

use crate::error::RouteConfigError;

/// Constraint applied to a single url parameter value.
///
/// Built from the constraint token of a segment pattern such as
/// `:id:int` or `:code:[a-z]{3}`. A missing token defaults to `string`,
/// which accepts any value.
///
/// # Examples
///
/// ```
/// use weft_router::ParameterConstraint;
///
/// let int = ParameterConstraint::parse("int").unwrap();
/// assert!(int.is_eligible("42"));
/// assert!(!int.is_eligible("forty-two"));
///
/// let code = ParameterConstraint::parse("[a-z]{3}").unwrap();
/// assert!(code.is_eligible("abc"));
/// assert!(!code.is_eligible("abcd"));
/// ```
#[derive(Debug, Clone)]
pub enum ParameterConstraint {
    /// 32-bit signed integer, base 10.
    Int,
    /// 64-bit signed integer, base 10.
    Long,
    /// Case-insensitive `true` or `false`.
    Bool,
    /// Any value. The default when no constraint token is given.
    String,
    /// Full-string regular expression match.
    Regex {
        /// The constraint token exactly as written in the template.
        raw: std::string::String,
        compiled: Regex,
    },
}

impl ParameterConstraint {
    /// Parses a constraint token.
    ///
    /// Anything that is not one of the primitive tokens is compiled as a
    /// regular expression; a compile failure is reported as
    /// [`RouteConfigError::InvalidConstraint`].
    pub fn parse(token: &str) -> Result<Self, RouteConfigError> {
        match token {
            "int" => Ok(Self::Int),
            "long" => Ok(Self::Long),
            "bool" | "boolean" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            other => {
                // Anchor the expression so eligibility is a full-string match.
                let compiled = Regex::new(&format!("^(?:{other})$")).map_err(|source| {
                    RouteConfigError::InvalidConstraint {
                        pattern: other.to_string(),
                        source,
                    }
                })?;
                Ok(Self::Regex {
                    raw: other.to_string(),
                    compiled,
                })
            }
        }
    }

    /// Whether `value` satisfies this constraint.
    ///
    /// An ineligible value means "no match here", never an error: integer
    /// overflow and parse failures simply return `false`.
    pub fn is_eligible(&self, value: &str) -> bool {
        match self {
            Self::Int => value.parse::<i32>().is_ok(),
            Self::Long => value.parse::<i64>().is_ok(),
            Self::Bool => value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false"),
            Self::String => true,
            Self::Regex { compiled, .. } => compiled.is_match(value),
        }
    }

    /// Whether this is one of the primitive type constraints.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Regex { .. })
    }

    /// The primitive type name, collapsing regex constraints to `string`.
    pub fn as_primitive_str(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Bool => "bool",
            Self::String | Self::Regex { .. } => "string",
        }
    }
}

impl fmt::Display for ParameterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex { raw, .. } => f.write_str(raw),
            primitive => f.write_str(primitive.as_primitive_str()),
        }
    }
}

impl PartialEq for ParameterConstraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int, Self::Int)
            | (Self::Long, Self::Long)
            | (Self::Bool, Self::Bool)
            | (Self::String, Self::String) => true,
            (Self::Regex { raw: a, .. }, Self::Regex { raw: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for ParameterConstraint {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_eligibility() {
        let constraint = ParameterConstraint::parse("int").unwrap();
        assert!(constraint.is_eligible("0"));
        assert!(constraint.is_eligible("-17"));
        assert!(constraint.is_eligible("2147483647"));
        assert!(!constraint.is_eligible("2147483648")); // overflow is ineligible
        assert!(!constraint.is_eligible("abc"));
        assert!(!constraint.is_eligible(""));
    }

    #[test]
    fn test_long_eligibility() {
        let constraint = ParameterConstraint::parse("long").unwrap();
        assert!(constraint.is_eligible("9223372036854775807"));
        assert!(!constraint.is_eligible("9223372036854775808"));
        assert!(!constraint.is_eligible("1.5"));
    }

    #[test]
    fn test_bool_eligibility() {
        let constraint = ParameterConstraint::parse("bool").unwrap();
        assert!(constraint.is_eligible("true"));
        assert!(constraint.is_eligible("FALSE"));
        assert!(constraint.is_eligible("True"));
        assert!(!constraint.is_eligible("yes"));
        assert!(!constraint.is_eligible("1"));
    }

    #[test]
    fn test_boolean_alias() {
        let constraint = ParameterConstraint::parse("boolean").unwrap();
        assert_eq!(constraint, ParameterConstraint::Bool);
    }

    #[test]
    fn test_string_accepts_anything() {
        let constraint = ParameterConstraint::parse("string").unwrap();
        assert!(constraint.is_eligible("anything at all"));
        assert!(constraint.is_eligible(""));
    }

    #[test]
    fn test_regex_is_anchored() {
        let constraint = ParameterConstraint::parse("[0-9]+").unwrap();
        assert!(constraint.is_eligible("123"));
        // A substring match is not enough.
        assert!(!constraint.is_eligible("a123"));
        assert!(!constraint.is_eligible("123b"));
    }

    #[test]
    fn test_regex_with_alternation() {
        let constraint = ParameterConstraint::parse("cat|dog").unwrap();
        assert!(constraint.is_eligible("cat"));
        assert!(constraint.is_eligible("dog"));
        assert!(!constraint.is_eligible("catfish"));
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let result = ParameterConstraint::parse("[unclosed");
        assert!(matches!(
            result,
            Err(RouteConfigError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(ParameterConstraint::parse("int").unwrap().to_string(), "int");
        assert_eq!(
            ParameterConstraint::parse("[a-z]+").unwrap().to_string(),
            "[a-z]+"
        );
    }
}

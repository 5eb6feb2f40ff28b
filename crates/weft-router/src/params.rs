//! Parameter values extracted from, or supplied to, routes.
//!
//! [`RouteParams`] is both the output of `Router::resolve` (the values
//! extracted from a navigation path) and a ready-made input for
//! `Router::build_url`. Callers with their own parameter storage only need
//! to implement [`ParamSource`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single url parameter value.
///
/// Ordinary parameters carry exactly one value; varargs parameters carry an
/// ordered list of zero or more values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Value of an ordinary (single-segment) parameter.
    Single(String),
    /// Values of a varargs parameter, in path order.
    List(Vec<String>),
}

/// Lookup contract used when rendering a url from a template.
///
/// `get` must answer for single-value parameters and `get_list` for varargs
/// parameters; a name absent from the source returns `None`.
pub trait ParamSource {
    /// The value of a single-value parameter, if present.
    fn get(&self, name: &str) -> Option<&str>;

    /// The values of a varargs parameter, if present.
    fn get_list(&self, name: &str) -> Option<&[String]>;
}

/// Named parameter values keyed by parameter name.
///
/// # Examples
///
/// ```
/// use weft_router::RouteParams;
///
/// let params = RouteParams::new()
///     .with("id", "42")
///     .with_list("rest", vec!["a".into(), "b".into()]);
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get_list("rest").map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams {
    values: HashMap<String, ParamValue>,
}

impl RouteParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single-value parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), ParamValue::Single(value.into()));
    }

    /// Sets a varargs parameter, replacing any previous value.
    pub fn set_list(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), ParamValue::List(values));
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style [`set_list`](Self::set_list).
    pub fn with_list(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.set_list(name, values);
        self
    }

    /// The value of a single-value parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// The values of a varargs parameter.
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ParamValue::List(values)) => Some(values),
            _ => None,
        }
    }

    /// Whether a parameter of either shape is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Absorbs all entries of `other`, overwriting on name collision.
    pub(crate) fn merge(&mut self, other: RouteParams) {
        self.values.extend(other.values);
    }
}

impl ParamSource for RouteParams {
    fn get(&self, name: &str) -> Option<&str> {
        RouteParams::get(self, name)
    }

    fn get_list(&self, name: &str) -> Option<&[String]> {
        RouteParams::get_list(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_list_are_distinct() {
        let params = RouteParams::new()
            .with("id", "7")
            .with_list("rest", vec!["x".into()]);

        assert_eq!(params.get("id"), Some("7"));
        assert_eq!(params.get_list("id"), None);
        assert_eq!(params.get("rest"), None);
        assert_eq!(params.get_list("rest"), Some(&["x".to_string()][..]));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut params = RouteParams::new().with("id", "1");
        params.merge(RouteParams::new().with("id", "2").with("other", "3"));

        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.get("other"), Some("3"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_serde_shapes() {
        let params = RouteParams::new()
            .with("id", "42")
            .with_list("rest", vec!["a".into(), "b".into()]);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["rest"], serde_json::json!(["a", "b"]));

        let back: RouteParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}

//! # weft-router
//!
//! A segment-tree url router with typed, optional, and varargs parameters.
//!
//! Routes are registered as path templates. A template segment is either
//! literal text or a parameter:
//!
//! - `:id` - a mandatory parameter
//! - `:id:int` - a parameter constrained to 32-bit integers (`long`, `bool`
//!   and regular expressions are also accepted as constraints)
//! - `[:id]` - an optional parameter, matched by presence or absence
//! - `...:rest` - a varargs parameter capturing all remaining segments
//!
//! Ambiguous registrations are rejected up front, so any path resolves to at
//! most one target deterministically. Parameter alternatives are tried in
//! registration order and the first full match wins.
//!
//! ## Quick Start
//!
//! ```
//! use weft_router::Router;
//!
//! let mut router = Router::new();
//! router.add_route("users/:id:int", "user-detail")?;
//! router.add_route("users/new", "user-form")?;
//! router.add_route("files/...:path", "file-browser")?;
//!
//! let m = router.resolve("users/42").unwrap();
//! assert_eq!(m.target, "user-detail");
//! assert_eq!(m.params.get("id"), Some("42"));
//!
//! // Static text wins over the parameter alternative.
//! let m = router.resolve("users/new").unwrap();
//! assert_eq!(m.target, "user-form");
//!
//! let m = router.resolve("files/docs/readme.md").unwrap();
//! assert_eq!(m.params.get_list("path"), Some(&["docs".into(), "readme.md".into()][..]));
//! # Ok::<(), weft_router::RouteConfigError>(())
//! ```
//!
//! Registered templates can also be rendered back into concrete urls:
//!
//! ```
//! use weft_router::{RouteParams, Router};
//!
//! let mut router = Router::new();
//! router.add_route("users/:id:int/edit", "edit")?;
//!
//! let url = router.build_url("users/:id:int/edit", &RouteParams::new().with("id", "7"))?;
//! assert_eq!(url, "users/7/edit");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};

mod constraint;
mod error;
mod params;
pub mod path;
pub mod route;

pub use constraint::ParameterConstraint;
pub use error::{RouteConfigError, UrlBuildError};
pub use params::{ParamSource, ParamValue, RouteParams};
pub use route::ParamDescriptor;

use route::segment::Segment;

// ============================================================================
// Route Targets
// ============================================================================

/// A value routes resolve to.
///
/// The display name is used in configuration error messages, so two
/// conflicting registrations can be reported by name.
pub trait RouteTarget: Clone + PartialEq {
    /// A human readable name for this target.
    fn display_name(&self) -> Cow<'_, str>;
}

impl RouteTarget for String {
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RouteTarget for &'static str {
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

// ============================================================================
// Resolution Result
// ============================================================================

/// A successful path resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<T> {
    /// The resolved path in canonical form (no leading, trailing or doubled
    /// slashes).
    pub path: String,
    /// The target the path resolved to.
    pub target: T,
    /// Parameter values extracted from the path.
    pub params: RouteParams,
}

// ============================================================================
// Template Formatting
// ============================================================================

/// Controls how [`Router::format_template`] renders parameter segments.
///
/// With no flags set a parameter renders as a bare `:` (or `{}` with
/// [`curly_braces`](Self::with_curly_braces)); flags add the name and the
/// constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormat {
    curly_braces: bool,
    name: bool,
    constraint: bool,
    simplified: bool,
    capitalized: bool,
}

impl TemplateFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render parameters as `{name:constraint}` instead of `:name:constraint`.
    pub fn with_curly_braces(mut self) -> Self {
        self.curly_braces = true;
        self
    }

    /// Include the parameter name.
    pub fn with_name(mut self) -> Self {
        self.name = true;
        self
    }

    /// Include the constraint exactly as written in the template.
    pub fn with_constraint(mut self) -> Self {
        self.constraint = true;
        self
    }

    /// Include the constraint reduced to a primitive token, rendering any
    /// regular expression as `string`.
    pub fn with_simplified_constraint(mut self) -> Self {
        self.simplified = true;
        self
    }

    /// Capitalize primitive constraint tokens, e.g. `Int`.
    pub fn with_capitalized_constraint(mut self) -> Self {
        self.capitalized = true;
        self
    }

    fn render_param(&self, descriptor: &ParamDescriptor) -> String {
        let mut out = String::new();
        out.push(if self.curly_braces { '{' } else { ':' });

        let with_constraint = self.constraint || self.simplified || self.capitalized;

        if self.name {
            out.push_str(descriptor.name());
            if with_constraint {
                out.push(':');
            }
        }

        if with_constraint {
            let constraint = descriptor.constraint();
            let mut text = constraint.to_string();
            if self.simplified || constraint.is_primitive() {
                if !constraint.is_primitive() {
                    text = "string".to_string();
                }
                if self.capitalized {
                    text = capitalize(&text);
                }
            }
            out.push_str(&text);
        }

        if self.curly_braces {
            out.push('}');
        }
        out
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Router
// ============================================================================

/// The route registry and matcher.
///
/// Cloning a router deep-copies the whole tree; the clone and the original
/// evolve independently afterwards.
#[derive(Debug, Clone)]
pub struct Router<T: RouteTarget> {
    root: Segment<T>,
}

impl<T: RouteTarget> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RouteTarget> Router<T> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            root: Segment::root(),
        }
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.root.is_pristine()
    }

    /// Registers a path template.
    ///
    /// The template is normalized first, so `/users/:id/` and `users/:id`
    /// register the same route. The empty template registers the root path.
    ///
    /// # Errors
    ///
    /// Rejects templates that would make resolution ambiguous (duplicate
    /// templates, an optional parameter shadowed by the parameterless form),
    /// templates with segments after a varargs parameter, and parameter
    /// constraints that fail to compile as regular expressions. A rejected
    /// registration leaves the router exactly as it was.
    pub fn add_route(&mut self, template: &str, target: T) -> Result<(), RouteConfigError> {
        let template = path::normalize(template);
        let patterns = path::segments(&template);
        self.root.insert(&patterns, target)?;
        debug!(template = %template, "registered route");
        Ok(())
    }

    /// Removes the registration for a template, if any.
    ///
    /// Only the exact template is affected; other routes sharing a prefix
    /// with it stay registered. Removing an unknown template is a no-op.
    pub fn remove_route(&mut self, template: &str) {
        let template = path::normalize(template);
        let patterns = path::segments(&template);
        self.root.remove(&patterns);
        debug!(template = %template, "removed route");
    }

    /// Resolves a navigation path to its target, extracting parameter
    /// values along the way.
    ///
    /// Returns `None` when no registered route matches.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<T>> {
        let normalized = path::normalize(path);
        let segments = path::segments(&normalized);
        let mut params = RouteParams::new();
        let target = self.root.find_route_target(&segments, &mut params)?;
        trace!(path = %normalized, "resolved route");
        Some(RouteMatch {
            path: normalized.into_owned(),
            target: target.clone(),
            params,
        })
    }

    /// Builds a concrete url for a registered template.
    ///
    /// Mandatory parameters must be present in `params` and every supplied
    /// value must satisfy its constraint; optional parameters may be
    /// omitted, as may a varargs list.
    pub fn build_url(
        &self,
        template: &str,
        params: &dyn ParamSource,
    ) -> Result<String, UrlBuildError> {
        let template = path::normalize(template);
        let patterns = path::segments(&template);
        self.root.render_url(&patterns, params)
    }

    /// All registered routes as `(template, target)` pairs.
    pub fn routes(&self) -> HashMap<String, T> {
        let mut out = HashMap::new();
        self.root.collect_routes("", &mut out);
        out
    }

    /// The parameters of a registered template, as a map from parameter name
    /// to its primitive constraint token (regular expression constraints
    /// report `string`).
    pub fn route_parameters(&self, template: &str) -> Result<HashMap<String, String>, UrlBuildError> {
        let mut out = HashMap::new();
        self.walk_template(template, &mut |segment| {
            if let Some(descriptor) = segment.descriptor() {
                out.insert(
                    descriptor.name().to_string(),
                    descriptor.constraint().as_primitive_str().to_string(),
                );
            }
        })?;
        Ok(out)
    }

    /// A deep copy of the route table.
    ///
    /// Useful for handing a stable view to readers while the original keeps
    /// being mutated.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Whether a template string declares any parameters.
    ///
    /// Purely syntactic; the template does not need to be registered.
    pub fn has_parameters(template: &str) -> bool {
        template.contains(':')
    }

    /// Re-renders a registered template with its parameter segments formatted
    /// per `format`. Literal segments pass through unchanged.
    pub fn format_template(
        &self,
        template: &str,
        format: TemplateFormat,
    ) -> Result<String, UrlBuildError> {
        let mut rendered: Vec<String> = Vec::new();
        self.walk_template(template, &mut |segment| {
            rendered.push(match segment.descriptor() {
                Some(descriptor) => format.render_param(descriptor),
                None => segment.name.clone(),
            });
        })?;
        Ok(rendered.join("/"))
    }

    fn walk_template<'s>(
        &'s self,
        template: &str,
        visit: &mut dyn FnMut(&'s Segment<T>),
    ) -> Result<(), UrlBuildError> {
        let template = path::normalize(template);
        let patterns = path::segments(&template);
        if self.root.for_each_segment(&patterns, visit) {
            Ok(())
        } else {
            Err(UrlBuildError::UnregisteredTemplate(template.into_owned()))
        }
    }
}

//! The route segment tree.
//!
//! Each registered template is stored one segment per node. A node owns
//! three child collections keyed by the raw segment pattern:
//!
//! - static children, in a map (exact-text lookup)
//! - parameter children, in a vec - iteration order is registration order
//!   and is semantically significant: resolution tries parameter children
//!   in the order their templates were added, first match wins
//! - varargs children, also in registration order
//!
//! A node carries a target exactly when some registered template terminates
//! at it.
//!
//! Resolution precedence at every level: exact static match, then parameter
//! children in order, then optional-parameter skips in order, then varargs
//! children in order.

use std::collections::HashMap;

use crate::error::{RouteConfigError, UrlBuildError};
use crate::params::{ParamSource, RouteParams};
use crate::route::param::{
    is_optional_pattern, is_parameter_pattern, is_varargs_pattern, ParamDescriptor,
};
use crate::RouteTarget;

/// What a single tree node represents.
#[derive(Debug, Clone)]
pub(crate) enum SegmentKind {
    /// Literal path text, matched by string equality.
    Static,
    /// A single-segment url parameter.
    Param(ParamDescriptor),
    /// A parameter capturing all remaining path segments.
    Varargs(ParamDescriptor),
}

/// One node of the route tree.
#[derive(Debug, Clone)]
pub(crate) struct Segment<T> {
    /// Literal text for static nodes, the parameter name otherwise.
    pub(crate) name: String,
    /// The segment pattern exactly as written in the template. Used as the
    /// child key, so `users`, `:users` and `[:users]` are distinct siblings.
    pub(crate) pattern: String,
    pub(crate) kind: SegmentKind,
    /// Present iff a registered template terminates at this node.
    pub(crate) target: Option<T>,
    static_children: HashMap<String, Segment<T>>,
    param_children: Vec<Segment<T>>,
    varargs_children: Vec<Segment<T>>,
}

impl<T: RouteTarget> Segment<T> {
    /// The empty segment forming the root of the tree.
    pub(crate) fn root() -> Self {
        Self::with_kind(String::new(), String::new(), SegmentKind::Static)
    }

    fn new(pattern: &str) -> Result<Self, RouteConfigError> {
        if is_parameter_pattern(pattern) {
            let descriptor = ParamDescriptor::parse(pattern)?;
            let name = descriptor.name().to_string();
            let kind = if descriptor.is_varargs() {
                SegmentKind::Varargs(descriptor)
            } else {
                SegmentKind::Param(descriptor)
            };
            Ok(Self::with_kind(name, pattern.to_string(), kind))
        } else {
            Ok(Self::with_kind(
                pattern.to_string(),
                pattern.to_string(),
                SegmentKind::Static,
            ))
        }
    }

    fn with_kind(name: String, pattern: String, kind: SegmentKind) -> Self {
        Self {
            name,
            pattern,
            kind,
            target: None,
            static_children: HashMap::new(),
            param_children: Vec::new(),
            varargs_children: Vec::new(),
        }
    }

    /// The parameter descriptor, for parameter and varargs nodes.
    pub(crate) fn descriptor(&self) -> Option<&ParamDescriptor> {
        match &self.kind {
            SegmentKind::Param(descriptor) | SegmentKind::Varargs(descriptor) => Some(descriptor),
            SegmentKind::Static => None,
        }
    }

    fn is_optional_param(&self) -> bool {
        self.descriptor().is_some_and(ParamDescriptor::is_optional)
    }

    fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.static_children.is_empty()
            && self.param_children.is_empty()
            && self.varargs_children.is_empty()
    }

    // ------------------------------------------------------------------
    // Child bookkeeping
    // ------------------------------------------------------------------

    /// Looks up a child by its raw segment pattern, across all three kinds.
    fn child_by_pattern(&self, pattern: &str) -> Option<&Segment<T>> {
        if is_varargs_pattern(pattern) {
            self.varargs_children.iter().find(|c| c.pattern == pattern)
        } else if is_parameter_pattern(pattern) {
            self.param_children.iter().find(|c| c.pattern == pattern)
        } else {
            self.static_children.get(pattern)
        }
    }

    fn child_by_pattern_mut(&mut self, pattern: &str) -> Option<&mut Segment<T>> {
        if is_varargs_pattern(pattern) {
            self.varargs_children
                .iter_mut()
                .find(|c| c.pattern == pattern)
        } else if is_parameter_pattern(pattern) {
            self.param_children
                .iter_mut()
                .find(|c| c.pattern == pattern)
        } else {
            self.static_children.get_mut(pattern)
        }
    }

    /// Files a new child under the collection its raw pattern classifies
    /// into. Note that a bracketed varargs like `[...:rest]` does not start
    /// with `...:` and therefore files under the parameter children; its
    /// node kind still drives matching correctly.
    fn attach(&mut self, child: Segment<T>) {
        if is_varargs_pattern(&child.pattern) {
            self.varargs_children.push(child);
        } else if is_parameter_pattern(&child.pattern) {
            self.param_children.push(child);
        } else {
            self.static_children.insert(child.pattern.clone(), child);
        }
    }

    fn detach(&mut self, pattern: &str) {
        if is_varargs_pattern(pattern) {
            self.varargs_children.retain(|c| c.pattern != pattern);
        } else if is_parameter_pattern(pattern) {
            self.param_children.retain(|c| c.pattern != pattern);
        } else {
            self.static_children.remove(pattern);
        }
    }

    fn detach_if_empty(&mut self, pattern: &str) {
        if self
            .child_by_pattern(pattern)
            .is_some_and(Segment::is_empty)
        {
            self.detach(pattern);
        }
    }

    /// All children, static first, then parameters and varargs in
    /// registration order.
    fn children(&self) -> impl Iterator<Item = &Segment<T>> {
        self.static_children
            .values()
            .chain(self.param_children.iter())
            .chain(self.varargs_children.iter())
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Inserts a template, creating intermediate nodes on demand.
    ///
    /// Ambiguity is validated as the tree is descended; a failed insertion
    /// leaves no freshly created empty nodes behind.
    pub(crate) fn insert(&mut self, patterns: &[&str], target: T) -> Result<(), RouteConfigError> {
        if patterns.is_empty() {
            // The empty template registers the root itself.
            return self.place_target(target);
        }

        let pattern = patterns[0];
        let created = self.child_by_pattern(pattern).is_none();

        if created {
            if is_varargs_pattern(pattern) && patterns.len() > 1 {
                return Err(RouteConfigError::VarargsNotLast);
            }

            // A trailing optional parameter would never be absent if the
            // route without it already resolves here.
            if is_optional_pattern(pattern) && patterns.len() == 1 {
                if let Some(existing) = &self.target {
                    return Err(RouteConfigError::UnreachableOptional {
                        optional: target.display_name().into_owned(),
                        other: existing.display_name().into_owned(),
                    });
                }
            }

            self.attach(Segment::new(pattern)?);
        }

        let result = match self.child_by_pattern_mut(pattern) {
            Some(child) if patterns.len() > 1 => child.insert(&patterns[1..], target),
            Some(child) => child.place_target(target),
            // The child was either found or attached just above.
            None => Ok(()),
        };

        if created && result.is_err() {
            self.detach_if_empty(pattern);
        }
        result
    }

    /// Marks this node as a route terminus.
    fn place_target(&mut self, target: T) -> Result<(), RouteConfigError> {
        if let Some(existing) = &self.target {
            let existing = existing.display_name().into_owned();
            let proposed = target.display_name().into_owned();
            return Err(match self.kind {
                SegmentKind::Static => RouteConfigError::AmbiguousRoute { existing, proposed },
                _ => RouteConfigError::AmbiguousParameterRoute { existing, proposed },
            });
        }

        // Symmetric unreachability check: a child optional parameter that
        // already carries a target would lose its zero-parameter form to us.
        for child in &self.param_children {
            if child.is_optional_param() {
                if let Some(optional) = &child.target {
                    return Err(RouteConfigError::UnreachableOptional {
                        optional: optional.display_name().into_owned(),
                        other: target.display_name().into_owned(),
                    });
                }
            }
        }

        self.target = Some(target);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Clears the registration at the end of `patterns`.
    ///
    /// A template that was never registered is a silent no-op. Children of
    /// the terminal node are left intact; nodes emptied by the removal are
    /// pruned on the way back up.
    pub(crate) fn remove(&mut self, patterns: &[&str]) {
        if patterns.is_empty() {
            self.target = None;
            return;
        }

        let pattern = patterns[0];
        let mut emptied = false;
        if let Some(child) = self.child_by_pattern_mut(pattern) {
            if patterns.len() > 1 {
                child.remove(&patterns[1..]);
            } else {
                child.target = None;
            }
            emptied = child.is_empty();
        }
        if emptied {
            self.detach(pattern);
        }
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolves a navigation path, accumulating extracted parameter values
    /// into `params` only for the branch that ultimately succeeds.
    pub(crate) fn find_route_target<'t>(
        &'t self,
        segments: &[&str],
        params: &mut RouteParams,
    ) -> Option<&'t T> {
        // An exact static match wins over everything. An empty segment list
        // happens only at the root, which then resolves against itself.
        let direct = if segments.is_empty() {
            Some(self)
        } else {
            self.static_children.get(segments[0])
        };
        if let Some(candidate) = direct {
            if let Some(target) = Self::try_candidate(candidate, segments, params) {
                return Some(target);
            }
        }
        if segments.is_empty() {
            return None;
        }

        // Parameter children in registration order, first match wins.
        for candidate in &self.param_children {
            if let Some(target) = Self::try_candidate(candidate, segments, params) {
                return Some(target);
            }
        }

        // Optional parameters may also match by absence: recurse into the
        // child without consuming a segment and without binding a value.
        for candidate in &self.param_children {
            if candidate.is_optional_param() {
                let mut skipped = RouteParams::new();
                if let Some(target) = candidate.find_route_target(segments, &mut skipped) {
                    params.merge(skipped);
                    return Some(target);
                }
            }
        }

        for candidate in &self.varargs_children {
            if let Some(target) = Self::try_candidate(candidate, segments, params) {
                return Some(target);
            }
        }

        None
    }

    /// Tries to complete the match through one candidate child, consuming
    /// one segment (or, for varargs, all of them).
    fn try_candidate<'t>(
        candidate: &'t Segment<T>,
        segments: &[&str],
        params: &mut RouteParams,
    ) -> Option<&'t T> {
        let mut collected = RouteParams::new();
        let mut segments = segments;

        match &candidate.kind {
            SegmentKind::Varargs(descriptor) => {
                // No partial varargs match: every remaining segment must be
                // eligible or the candidate fails entirely.
                if segments.iter().any(|value| !descriptor.is_eligible(value)) {
                    return None;
                }
                collected.set_list(
                    candidate.name.clone(),
                    segments.iter().map(|s| s.to_string()).collect(),
                );
                segments = &[];
            }
            SegmentKind::Param(descriptor) => {
                let value = *segments.first()?;
                if !descriptor.is_eligible(value) {
                    return None;
                }
                collected.set(candidate.name.clone(), value);
            }
            SegmentKind::Static => {}
        }

        let rest = if segments.len() <= 1 {
            &[][..]
        } else {
            &segments[1..]
        };

        let target = if !rest.is_empty() {
            candidate.find_route_target(rest, &mut collected)
        } else if let Some(target) = &candidate.target {
            Some(target)
        } else {
            // No target exactly here: a chain of optional descendants (or a
            // varargs child, which accepts zero segments) may still provide
            // one.
            candidate
                .default_fallback()
                .and_then(|segment| segment.target.as_ref())
        };

        match target {
            Some(target) => {
                params.merge(collected);
                Some(target)
            }
            None => None,
        }
    }

    /// Searches for a descendant that can terminate the route without
    /// consuming any real segment: an optional parameter child carrying a
    /// target, else the chain through the first optional child, else the
    /// first varargs child (whose own target presence the caller checks).
    fn default_fallback(&self) -> Option<&Segment<T>> {
        for child in &self.param_children {
            if child.is_optional_param() && child.target.is_some() {
                return Some(child);
            }
        }

        for child in &self.param_children {
            if child.is_optional_param() {
                return child.default_fallback();
            }
        }

        self.varargs_children.first()
    }

    // ------------------------------------------------------------------
    // Template walking and rendering
    // ------------------------------------------------------------------

    /// Visits the node chain of an already-registered template, giving the
    /// visitor one node per template segment. Returns `false` as soon as a
    /// segment is not found, i.e. the template is not registered.
    pub(crate) fn for_each_segment<'t>(
        &'t self,
        patterns: &[&str],
        visit: &mut dyn FnMut(&'t Segment<T>),
    ) -> bool {
        if patterns.is_empty() {
            return true;
        }
        match self.child_by_pattern(patterns[0]) {
            Some(child) => {
                visit(child);
                child.for_each_segment(&patterns[1..], visit)
            }
            None => false,
        }
    }

    /// Renders a registered template into a concrete url using the supplied
    /// parameter values.
    pub(crate) fn render_url(
        &self,
        patterns: &[&str],
        params: &dyn ParamSource,
    ) -> Result<String, UrlBuildError> {
        let mut chain = Vec::with_capacity(patterns.len());
        if !self.for_each_segment(patterns, &mut |segment| chain.push(segment)) {
            return Err(UrlBuildError::UnregisteredTemplate(crate::path::join(
                patterns,
            )));
        }

        let mut rendered: Vec<String> = Vec::with_capacity(chain.len());
        for segment in chain {
            match &segment.kind {
                SegmentKind::Static => rendered.push(segment.name.clone()),
                SegmentKind::Param(descriptor) => match params.get(&segment.name) {
                    Some(value) => {
                        if !descriptor.is_eligible(value) {
                            return Err(UrlBuildError::IneligibleValue {
                                name: segment.name.clone(),
                                value: value.to_string(),
                                pattern: segment.pattern.clone(),
                            });
                        }
                        rendered.push(value.to_string());
                    }
                    None => {
                        if descriptor.is_mandatory() {
                            return Err(UrlBuildError::MissingParameter(segment.name.clone()));
                        }
                    }
                },
                SegmentKind::Varargs(descriptor) => {
                    if let Some(values) = params.get_list(&segment.name) {
                        for value in values {
                            if !descriptor.is_eligible(value) {
                                return Err(UrlBuildError::IneligibleValue {
                                    name: segment.name.clone(),
                                    value: value.clone(),
                                    pattern: segment.pattern.clone(),
                                });
                            }
                            rendered.push(value.clone());
                        }
                    }
                    // Varargs are always last, nothing can follow.
                    break;
                }
            }
        }

        Ok(rendered.join("/"))
    }

    // ------------------------------------------------------------------
    // Enumeration
    // ------------------------------------------------------------------

    /// Collects every registered `(full template, target)` pair below and
    /// including this node.
    pub(crate) fn collect_routes(&self, prefix: &str, out: &mut HashMap<String, T>) {
        if let Some(target) = &self.target {
            out.insert(prefix.to_string(), target.clone());
        }
        for child in self.children() {
            let path = if prefix.is_empty() {
                child.pattern.clone()
            } else {
                format!("{}/{}", prefix, child.pattern)
            };
            child.collect_routes(&path, out);
        }
    }

    /// Whether the whole tree below (and including) this node is empty.
    pub(crate) fn is_pristine(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(segment: &mut Segment<&'static str>, template: &str, target: &'static str) {
        let patterns = crate::path::segments(template);
        segment.insert(&patterns, target).unwrap();
    }

    #[test]
    fn test_insert_builds_expected_shape() {
        let mut root: Segment<&'static str> = Segment::root();
        insert(&mut root, "users/:id:int", "user");
        insert(&mut root, "users/new", "new-user");

        let users = root.child_by_pattern("users").unwrap();
        assert!(users.child_by_pattern(":id:int").is_some());
        assert!(users.child_by_pattern("new").is_some());
        assert!(users.target.is_none());
    }

    #[test]
    fn test_remove_prunes_empty_chain() {
        let mut root: Segment<&'static str> = Segment::root();
        insert(&mut root, "a/b/c", "deep");
        assert!(!root.is_pristine());

        root.remove(&["a", "b", "c"]);
        assert!(root.is_pristine());
    }

    #[test]
    fn test_remove_keeps_shared_prefix() {
        let mut root: Segment<&'static str> = Segment::root();
        insert(&mut root, "a/b/c", "deep");
        insert(&mut root, "a/b", "shallow");

        root.remove(&["a", "b", "c"]);
        let mut routes = HashMap::new();
        root.collect_routes("", &mut routes);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes.get("a/b"), Some(&"shallow"));
    }

    #[test]
    fn test_failed_insert_leaves_no_husk() {
        let mut root: Segment<&'static str> = Segment::root();
        let result = root.insert(&["files", "...:rest", "tail"], "bad");
        assert!(matches!(result, Err(RouteConfigError::VarargsNotLast)));
        assert!(root.is_pristine());
    }
}

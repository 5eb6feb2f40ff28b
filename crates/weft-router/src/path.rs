//! Slash-delimited path handling.
//!
//! All functions are pure. Paths and templates are treated as an ordered
//! sequence of non-empty segments: leading slashes, trailing slashes and
//! empty segments collapse out, so `/users/42/`, `users/42` and `users//42`
//! all describe the same route.
//!
//! The canonical form used throughout the crate has no leading or trailing
//! slash; the root path is the empty string.

use std::borrow::Cow;

/// Splits a path or template into its non-empty segments.
///
/// # Examples
///
/// ```
/// use weft_router::path::segments;
///
/// assert_eq!(segments("/users/42"), vec!["users", "42"]);
/// assert_eq!(segments("users//42/"), vec!["users", "42"]);
/// assert!(segments("/").is_empty());
/// assert!(segments("").is_empty());
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Joins segments back into a canonical path string.
///
/// The inverse of [`segments`]: an empty slice renders as the empty string
/// (the root path).
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a path is already in canonical form.
///
/// Canonical paths have no leading slash, no trailing slash and no empty
/// segments. The empty string (root) is canonical.
pub fn is_canonical(path: &str) -> bool {
    path.is_empty()
        || (!path.starts_with('/') && !path.ends_with('/') && !path.contains("//"))
}

/// Normalizes a path to canonical form.
///
/// Returns `Cow::Borrowed` when the input is already canonical, so the
/// common case costs no allocation.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use weft_router::path::normalize;
///
/// assert!(matches!(normalize("users/42"), Cow::Borrowed("users/42")));
/// assert_eq!(normalize("/users/42/"), "users/42");
/// assert_eq!(normalize("/"), "");
/// ```
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }
    Cow::Owned(segments(path).join("/"))
}

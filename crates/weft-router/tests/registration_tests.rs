//! Integration tests for route registration, ambiguity detection and
//! removal.

use weft_router::{RouteConfigError, Router};

// ============================================================================
// Ambiguity detection
// ============================================================================

#[test]
fn test_duplicate_static_template_rejected() {
    let mut router = Router::new();
    router.add_route("users/list", "first").unwrap();

    let err = router.add_route("users/list", "second").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::AmbiguousRoute { existing, proposed }
            if existing == "first" && proposed == "second"
    ));
}

#[test]
fn test_duplicate_parameter_template_rejected() {
    let mut router = Router::new();
    router.add_route("users/:id:int", "first").unwrap();

    let err = router.add_route("users/:id:int", "second").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::AmbiguousParameterRoute { .. }
    ));
}

#[test]
fn test_equivalent_templates_normalize_to_the_same_route() {
    let mut router = Router::new();
    router.add_route("/users/:id/", "first").unwrap();

    let err = router.add_route("users/:id", "second").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::AmbiguousParameterRoute { .. }
    ));
}

#[test]
fn test_optional_made_unreachable_by_existing_shorter_route() {
    let mut router = Router::new();
    router.add_route("users", "plain").unwrap();

    let err = router.add_route("users/[:id]", "with-optional").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::UnreachableOptional { optional, other }
            if optional == "with-optional" && other == "plain"
    ));
}

#[test]
fn test_shorter_route_rejected_when_optional_exists() {
    let mut router = Router::new();
    router.add_route("users/[:id]", "with-optional").unwrap();

    let err = router.add_route("users", "plain").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::UnreachableOptional { optional, other }
            if optional == "with-optional" && other == "plain"
    ));
}

#[test]
fn test_varargs_must_be_last() {
    let mut router = Router::new();
    let err = router.add_route("files/...:path/extra", "bad").unwrap_err();
    assert!(matches!(err, RouteConfigError::VarargsNotLast));
}

#[test]
fn test_invalid_regex_constraint_rejected() {
    let mut router = Router::new();
    let err = router.add_route("code/:c:[unclosed", "bad").unwrap_err();
    assert!(matches!(
        err,
        RouteConfigError::InvalidConstraint { pattern, .. } if pattern == "[unclosed"
    ));
}

#[test]
fn test_failed_registration_leaves_router_unchanged() {
    let mut router = Router::new();
    router.add_route("users", "users").unwrap();

    router.add_route("files/...:path/extra", "bad").unwrap_err();
    router.add_route("shop/:c:[unclosed", "bad").unwrap_err();

    // The failed templates left no partial branches behind.
    let routes = router.routes();
    assert_eq!(routes.len(), 1);
    assert!(router.resolve("files").is_none());
    assert!(router.resolve("shop/x").is_none());
}

#[test]
fn test_distinct_sibling_patterns_coexist() {
    // Same parameter name, different raw patterns: these are separate
    // siblings, tried in registration order.
    let mut router = Router::new();
    router.add_route("go/:id:int", "int").unwrap();
    router.add_route("go/:id", "any").unwrap();

    assert_eq!(router.resolve("go/5").unwrap().target, "int");
    assert_eq!(router.resolve("go/abc").unwrap().target, "any");
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_only_affects_the_exact_template() {
    let mut router = Router::new();
    router.add_route("users/:id", "detail").unwrap();
    router.add_route("users/:id/edit", "edit").unwrap();

    router.remove_route("users/:id");

    assert!(router.resolve("users/5").is_none());
    assert_eq!(router.resolve("users/5/edit").unwrap().target, "edit");
}

#[test]
fn test_remove_prunes_unused_branches() {
    let mut router = Router::new();
    router.add_route("a/b/c", "deep").unwrap();

    router.remove_route("a/b/c");
    assert!(router.is_empty());
}

#[test]
fn test_removed_template_can_be_registered_again() {
    let mut router = Router::new();
    router.add_route("users", "old").unwrap();
    router.remove_route("users");

    router.add_route("users", "new").unwrap();
    assert_eq!(router.resolve("users").unwrap().target, "new");
}

#[test]
fn test_remove_unblocks_optional_registration() {
    let mut router = Router::new();
    router.add_route("users", "plain").unwrap();
    router.add_route("users/[:id]", "optional").unwrap_err();

    router.remove_route("users");
    router.add_route("users/[:id]", "optional").unwrap();

    assert_eq!(router.resolve("users").unwrap().target, "optional");
}

#[test]
fn test_remove_unknown_template_is_a_noop() {
    let mut router = Router::new();
    router.add_route("users", "users").unwrap();

    router.remove_route("never/registered");
    router.remove_route("users/:id");

    assert_eq!(router.resolve("users").unwrap().target, "users");
}

#[test]
fn test_remove_root_route() {
    let mut router = Router::new();
    router.add_route("", "home").unwrap();
    router.add_route("about", "about").unwrap();

    router.remove_route("/");

    assert!(router.resolve("").is_none());
    assert_eq!(router.resolve("about").unwrap().target, "about");
}

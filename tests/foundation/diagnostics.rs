//! Integration tests for diagnostics
//!
//! Tests construction, messages, two-phase contextualization and rendering.

use std::sync::Arc;

use tether_foundation::{Diagnostic, DiagnosticKind, Span, Type};

// =============================================================================
// Messages
// =============================================================================

#[test]
fn messages_name_the_problem() {
    assert_eq!(
        Diagnostic::out_of_input("a number").to_string(),
        "expected a number, but reached the end of the input"
    );
    assert_eq!(
        Diagnostic::invalid_argument("a number", "abc").to_string(),
        "expected a number, found 'abc'"
    );
    assert_eq!(
        Diagnostic::missing_closing_brace().to_string(),
        "missing closing '}'"
    );
}

#[test]
fn unknown_subcommand_lists_valid_names() {
    let valid = vec!["bytag".to_string(), "byname".to_string()];
    let given = Diagnostic::unknown_subcommand("filter", "bysize", valid.clone());
    assert_eq!(
        given.to_string(),
        "'filter' has no subcommand 'bysize'; expected one of: bytag, byname"
    );
    let missing = Diagnostic::unknown_subcommand("filter", "", valid);
    assert!(missing.to_string().contains("requires a subcommand"));
}

#[test]
fn no_implementation_names_the_signature() {
    let diag = Diagnostic::no_implementation("stage2", None, vec![], Type::Number);
    assert_eq!(diag.to_string(), "no implementation of `stage2 Number -> ???`");

    let diag = Diagnostic::no_implementation(
        "filter",
        Some("bytag".into()),
        vec![Type::Text],
        Type::list(Type::Item),
    );
    assert_eq!(
        diag.to_string(),
        "no implementation of `filter:bytag<Text> List<Item> -> ???`"
    );
}

#[test]
fn wrong_type_hint_only_in_once_mode() {
    let many = Diagnostic::wrong_type(Type::Bool, Type::Number, false);
    assert_eq!(
        many.to_string(),
        "expected an expression of type Bool, but got Number"
    );
    let once = Diagnostic::wrong_type(Type::Bool, Type::Number, true);
    assert!(once.to_string().contains("braces"));
}

// =============================================================================
// Contextualization
// =============================================================================

#[test]
fn contextualize_keeps_the_precise_span() {
    let source: Arc<str> = Arc::from("num 1 frob");
    let mut diag = Diagnostic::unknown_command("frob").at(Span::new(6, 10));
    diag.contextualize(&source, Span::new(0, 10));
    assert_eq!(diag.span, Some(Span::new(6, 10)));
    assert_eq!(diag.text.as_deref(), Some("num 1 frob"));
}

#[test]
fn contextualize_fills_a_missing_span() {
    let source: Arc<str> = Arc::from("num 1 div 0");
    let diag = Diagnostic::command("div: division by zero").contextualized(&source, Span::new(6, 11));
    assert_eq!(diag.span, Some(Span::new(6, 11)));
    assert!(matches!(diag.kind, DiagnosticKind::Command { .. }));
}

#[test]
fn contextualize_does_not_replace_source() {
    let inner: Arc<str> = Arc::from("inner");
    let outer: Arc<str> = Arc::from("outer");
    let diag = Diagnostic::command("x")
        .contextualized(&inner, Span::new(0, 5))
        .contextualized(&outer, Span::new(0, 5));
    assert_eq!(diag.text.as_deref(), Some("inner"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_without_context_is_one_line() {
    let diag = Diagnostic::unknown_command("frob");
    assert_eq!(diag.render(), "error: unknown command 'frob'");
}

#[test]
fn render_underlines_the_span() {
    let source: Arc<str> = Arc::from("num 1 frob");
    let diag = Diagnostic::unknown_command("frob").contextualized(&source, Span::new(6, 10));
    assert_eq!(
        diag.render(),
        "error: unknown command 'frob'\n  num 1 frob\n        ^^^^"
    );
}

#[test]
fn render_underlines_on_the_right_line() {
    let source: Arc<str> = Arc::from("range 3 map {\n  frob\n}");
    let diag = Diagnostic::unknown_command("frob").contextualized(&source, Span::new(16, 20));
    assert_eq!(diag.render(), "error: unknown command 'frob'\n    frob\n    ^^^^");
}

#[test]
fn render_appends_the_fault_trace() {
    let diag = Diagnostic::unhandled("explode", "boom", vec!["io failure".into()]);
    assert_eq!(
        diag.render(),
        "error: unhandled fault in 'explode': boom\n    at io failure"
    );
}

#[test]
fn diagnostics_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Diagnostic::missing_closing_brace());
}

//! End-to-end pipeline scenarios
//!
//! Each test parses a line against the standard registry and invokes it at
//! the host boundary, the way an embedding application would.

use tether::foundation::{DiagnosticKind, Span, Type, Value};
use tether::language::{
    Block, BufferedContext, Cursor, HostContext, ParseOptions, Stage, parse_line,
};
use tether::stdlib::standard_registry;

#[test]
fn producer_without_input() {
    let registry = standard_registry();
    let pipeline = parse_line("greet", &registry, &ParseOptions::new()).unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(
        pipeline.invoke(Value::Unit, &mut ctx),
        Some(Value::text("Hello, world!"))
    );
    assert!(ctx.take_errors().is_empty());
    assert!(ctx.lines().is_empty());
}

#[test]
fn unknown_command_span() {
    let registry = standard_registry();
    let err = parse_line("unknowncmd", &registry, &ParseOptions::new()).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::UnknownCommand { .. }));
    let span = err.span.unwrap();
    assert_eq!(span, Span::new(0, 10));
    assert_eq!(span.text("unknowncmd"), "unknowncmd");
}

#[test]
fn inversion_after_subcommand() {
    let registry = standard_registry();
    let mut cursor = Cursor::new(r#"filter:bytag not "tag""#);
    let stage = Stage::parse(&mut cursor, &registry, &Type::list(Type::Item)).unwrap();
    assert!(stage.bundle().inverted);
    assert_eq!(stage.bundle().subcommand.as_deref(), Some("bytag"));
}

#[test]
fn braced_block_and_missing_brace() {
    let registry = standard_registry();

    let mut cursor = Cursor::new("{ select count }");
    let block = Block::parse(&mut cursor, &registry, &Type::Unit, None).unwrap();
    assert!(!block.pipeline().is_once());
    assert_eq!(block.pipeline().len(), 2);

    let mut cursor = Cursor::new("{ select count ");
    let err = Block::parse(&mut cursor, &registry, &Type::Unit, None).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::MissingClosingBrace));
}

#[test]
fn stage_only_implemented_for_text() {
    let registry = standard_registry();
    let err = parse_line("num 1 upper", &registry, &ParseOptions::new()).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::NoImplementation { .. }));
    assert!(err.to_string().contains("upper Number -> ???"));
}

#[test]
fn wrong_final_type() {
    let registry = standard_registry();

    let options = ParseOptions::new().with_target(Type::Bool);
    let err = parse_line("range 3 sum", &registry, &options).unwrap_err();
    match &err.kind {
        DiagnosticKind::ExpressionOfWrongType {
            expected,
            actual,
            once,
        } => {
            assert_eq!(expected, &Type::Bool);
            assert_eq!(actual, &Type::Number);
            assert!(!once);
        }
        other => panic!("unexpected {other:?}"),
    }

    let once = options.once();
    let err = parse_line("num 3", &registry, &once).unwrap_err();
    assert!(err.render().contains("wrap chained commands in braces"));
}

#[test]
fn nested_error_reaches_the_host() {
    let registry = standard_registry();
    let pipeline =
        parse_line("range 4 where { div 0 gt 1 } count", &registry, &ParseOptions::new()).unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), None);
    let lines = ctx.take_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("error: div: division by zero"));
    assert!(lines[0].contains("range 4 where { div 0 gt 1 } count"));
}

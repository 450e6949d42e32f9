//! Integration tests for blocks

use tether_foundation::{DiagnosticKind, Span, Type, Value};
use tether_language::{Block, BufferedContext, Cursor};
use tether_stdlib::standard_registry;

#[test]
fn braced_block_chains_stages() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("{ select count }");
    let block = Block::parse(&mut cursor, &registry, &Type::Unit, None).unwrap();

    assert!(block.is_braced());
    assert!(!block.pipeline().is_once());
    assert_eq!(block.pipeline().len(), 2);
    assert_eq!(block.return_type(), &Type::Number);
    assert_eq!(block.span(), Span::new(0, 16));
    assert!(cursor.is_at_end());
}

#[test]
fn missing_closing_brace() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("{ select count");
    let err = Block::parse(&mut cursor, &registry, &Type::Unit, None).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::MissingClosingBrace));
    assert_eq!(err.span, Some(Span::new(0, 1)));
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn braces_inside_strings_do_not_close() {
    let registry = standard_registry();
    let mut cursor = Cursor::new(r#"{ echo "}" "#);
    let err = Block::parse(&mut cursor, &registry, &Type::Unit, None).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::MissingClosingBrace));
}

#[test]
fn unbraced_block_is_one_stage() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("gt 3 count");
    let block = Block::parse(&mut cursor, &registry, &Type::Number, Some(&Type::Bool)).unwrap();
    assert!(!block.is_braced());
    assert_eq!(block.pipeline().len(), 1);
    assert_eq!(cursor.rest().trim_start(), "count");
}

#[test]
fn unbraced_chain_missing_target_suggests_braces() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("mul 2 gt 5");
    let err = Block::parse(&mut cursor, &registry, &Type::Number, Some(&Type::Bool)).unwrap_err();
    assert!(matches!(
        err.kind,
        DiagnosticKind::ExpressionOfWrongType {
            expected: Type::Bool,
            actual: Type::Number,
            once: true,
        }
    ));
    assert!(err.to_string().contains("braces"));
}

#[test]
fn block_runs_against_its_input() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("{ mul 2 add 1 }");
    let block = Block::parse(&mut cursor, &registry, &Type::Number, None).unwrap();
    assert_eq!(block.pipeline().len(), 2);
    let mut ctx = BufferedContext::new();
    assert_eq!(block.run(Value::Number(4.0), &mut ctx).unwrap(), Value::Number(9.0));
    assert_eq!(block.invoke(Value::Number(0.0), &mut ctx), Some(Value::Number(1.0)));
}

#[test]
fn braced_target_stops_before_the_closing_brace() {
    let registry = standard_registry();
    let mut cursor = Cursor::new("{ mul 2 add 1 }");
    let err = Block::parse(&mut cursor, &registry, &Type::Number, Some(&Type::Number)).unwrap_err();
    assert!(matches!(
        err.kind,
        DiagnosticKind::InvalidArgument { ref expected, ref found } if expected == "'}'" && found == "add"
    ));
    assert_eq!(err.span, Some(Span::new(8, 11)));
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn empty_braces_are_rejected_at_the_brace() {
    let registry = standard_registry();
    for source in ["{ }", "{ not }"] {
        let mut cursor = Cursor::new(source);
        let err = Block::parse(&mut cursor, &registry, &Type::Number, Some(&Type::Bool)).unwrap_err();
        assert!(matches!(
            err.kind,
            DiagnosticKind::InvalidArgument { ref found, .. } if found == "}"
        ));
        assert_eq!(err.span, Some(Span::new(source.len() - 1, source.len())));
    }
}

//! Integration tests for pipeline building and the invocation boundary

use tether_foundation::{DiagnosticKind, Span, Type, Value};
use tether_language::{BufferedContext, HostContext, ParseOptions, parse_line};
use tether_stdlib::{CommandRegistry, standard_registry};

fn parse(source: &str) -> tether_foundation::Result<tether_language::Pipeline> {
    parse_line(source, &standard_registry(), &ParseOptions::new())
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn producer_pipeline_yields_its_value() {
    let pipeline = parse("greet").unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(
        pipeline.invoke(Value::Unit, &mut ctx),
        Some(Value::text("Hello, world!"))
    );
    assert!(!ctx.has_errors());
    assert!(ctx.lines().is_empty());
}

#[test]
fn type_chain_holds() {
    let pipeline = parse(r#"select filter:bytag "light" map name join "," len"#).unwrap();
    let stages = pipeline.stages();
    assert_eq!(stages.len(), 5);
    assert_eq!(stages[0].piped_type(), &Type::Unit);
    for pair in stages.windows(2) {
        assert_eq!(pair[1].piped_type(), pair[0].return_type());
    }
    assert_eq!(pipeline.return_type(), &Type::Number);
}

#[test]
fn unknown_command_is_contextualized() {
    let err = parse("unknowncmd").unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::UnknownCommand { .. }));
    assert_eq!(err.span, Some(Span::new(0, 10)));
    assert_eq!(err.text.as_deref(), Some("unknowncmd"));
}

#[test]
fn unknown_command_mid_pipeline() {
    let err = parse("num 1 frob").unwrap_err();
    assert_eq!(err.span, Some(Span::new(6, 10)));
    assert_eq!(err.render(), "error: unknown command 'frob'\n  num 1 frob\n        ^^^^");
}

#[test]
fn no_implementation_names_the_attempted_signature() {
    let err = parse("num 1 upper").unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::NoImplementation { .. }));
    assert_eq!(err.to_string(), "no implementation of `upper Number -> ???`");
    assert_eq!(err.span, Some(Span::new(6, 11)));
}

#[test]
fn target_type_mismatch() {
    let registry = standard_registry();
    let options = ParseOptions::new().with_target(Type::Bool);
    let err = parse_line("num 1 add 2", &registry, &options).unwrap_err();
    assert!(matches!(
        err.kind,
        DiagnosticKind::ExpressionOfWrongType { once: false, .. }
    ));
    assert!(!err.to_string().contains("braces"));

    let once = ParseOptions::new().with_target(Type::Bool).once();
    let err = parse_line("num 1", &registry, &once).unwrap_err();
    assert!(err.to_string().contains("braces"));
}

#[test]
fn target_stops_the_pipeline_early() {
    let registry = standard_registry();
    let options = ParseOptions::new().with_piped(Type::Number).with_target(Type::Bool);
    let pipeline = parse_line("gt 1", &registry, &options).unwrap();
    assert_eq!(pipeline.return_type(), &Type::Bool);

    let err = parse_line("gt 1 count", &registry, &options).unwrap_err();
    assert_eq!(err.to_string(), "no implementation of `count Bool -> ???`");
    assert_eq!(err.span, Some(Span::new(5, 10)));
}

#[test]
fn trailing_text_is_reported() {
    let err = parse("num 1 }").unwrap_err();
    assert_eq!(err.span, Some(Span::new(6, 7)));

    let err = parse("num 1 add").unwrap_err();
    assert!(err.is_out_of_input());
}

#[test]
fn empty_predicate_block_is_not_a_clean_stop() {
    for source in ["range 3 where { }", "range 3 where { not }"] {
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            DiagnosticKind::InvalidArgument { ref expected, ref found }
                if expected == "a command name" && found == "}"
        ));
        assert_eq!(err.span, Some(Span::new(source.len() - 1, source.len())));
    }
}

#[test]
fn empty_lines() {
    assert!(parse("   ").unwrap_err().is_out_of_input());

    let registry = standard_registry();
    let pipeline = parse_line("   ", &registry, &ParseOptions::new().allow_empty()).unwrap();
    assert!(pipeline.is_empty());
    let mut ctx = BufferedContext::new();
    assert_eq!(pipeline.invoke(Value::Number(7.0), &mut ctx), Some(Value::Number(7.0)));
}

#[test]
fn pipelines_are_reusable() {
    let pipeline = parse("range 4 sum").unwrap();
    for _ in 0..3 {
        let mut ctx = BufferedContext::new();
        assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), Some(Value::Number(6.0)));
    }
}

// =============================================================================
// Invocation boundary
// =============================================================================

#[test]
fn runtime_error_stops_remaining_stages() {
    let pipeline = parse("num 1 div 0 print").unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), None);
    assert_eq!(ctx.lines().len(), 1);
    assert!(ctx.lines()[0].contains("division by zero"));
}

#[test]
fn faults_are_contained() {
    let registry = CommandRegistry::new()
        .with(
            tether_stdlib::CommandDef::new("explode", "always faults").overload(
                tether_stdlib::InputPattern::Any,
                tether_stdlib::ReturnRule::SameAsInput,
                |_, _, _| Err(tether_language::CommandFault::new("boom")),
            ),
        )
        .with(
            tether_stdlib::CommandDef::new("panicky", "always panics").overload(
                tether_stdlib::InputPattern::Any,
                tether_stdlib::ReturnRule::SameAsInput,
                |_, _, _| panic!("kaboom"),
            ),
        );

    for source in ["explode", "panicky"] {
        let pipeline = parse_line(source, &registry, &ParseOptions::new()).unwrap();
        let mut ctx = BufferedContext::new();
        let err = pipeline.run(Value::Unit, &mut ctx).unwrap_err();
        assert!(matches!(err.kind, DiagnosticKind::UnhandledException { .. }));
        assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), None);
    }
}

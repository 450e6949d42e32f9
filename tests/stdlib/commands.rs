//! Integration tests for the standard command set

use tether_foundation::{DiagnosticKind, Item, Type, Value};
use tether_language::{BufferedContext, ParseOptions, parse_line};
use tether_stdlib::{standard_registry, standard_registry_with_items};

fn eval(source: &str) -> Result<Value, tether_foundation::Diagnostic> {
    let registry = standard_registry();
    let pipeline = parse_line(source, &registry, &ParseOptions::new())?;
    let mut ctx = BufferedContext::new();
    pipeline.run(Value::Unit, &mut ctx)
}

fn texts(value: &Value) -> Vec<String> {
    value
        .as_list()
        .map(|items| items.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

// =============================================================================
// Text
// =============================================================================

#[test]
fn text_commands() {
    assert_eq!(eval("greet upper").unwrap(), Value::text("HELLO, WORLD!"));
    assert_eq!(eval(r#"echo "MiXeD" lower"#).unwrap(), Value::text("mixed"));
    assert_eq!(eval(r#"echo "a b  c" split count"#).unwrap(), Value::Number(3.0));
    assert_eq!(eval(r#"echo "a,b" split "," join "-""#).unwrap(), Value::text("a-b"));
    assert_eq!(eval(r#"echo "tab\there" len"#).unwrap(), Value::Number(8.0));
}

#[test]
fn contains_can_be_inverted() {
    assert_eq!(eval(r#"greet contains "world""#).unwrap(), Value::Bool(true));
    assert_eq!(eval(r#"greet not contains "world""#).unwrap(), Value::Bool(false));
}

#[test]
fn optional_separator_does_not_swallow_commands() {
    assert_eq!(eval("select map name join len").unwrap(), Value::Number(22.0));
}

// =============================================================================
// Numbers and lists
// =============================================================================

#[test]
fn arithmetic_and_lists() {
    assert_eq!(eval("num 10 sub 4 div 2").unwrap(), Value::Number(3.0));
    assert_eq!(eval("range 10 where gt 6 sum").unwrap(), Value::Number(24.0));
    assert_eq!(eval("range 4 map { mul 2 } reverse first").unwrap(), Value::Number(6.0));
    assert_eq!(eval("range 3 any eq 2").unwrap(), Value::Bool(true));
}

#[test]
fn nested_maps() {
    let value = eval("range 3 map { add 1 } map { gt 1 }").unwrap();
    assert_eq!(value.value_type(), Type::list(Type::Bool));
    assert_eq!(texts(&value), ["false", "true", "true"]);
}

#[test]
fn runtime_errors_carry_the_stage_span() {
    let err = eval("range 3 map { div 0 }").unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::Command { .. }));
    assert!(err.render().contains("^^^^^"));
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn item_filters() {
    let value = eval(r#"select filter:bytag "light" map name"#).unwrap();
    assert_eq!(texts(&value), ["lamp", "torch"]);

    let value = eval(r#"select filter:bytag not "light" count"#).unwrap();
    assert_eq!(value, Value::Number(2.0));
}

#[test]
fn custom_items() {
    let registry = standard_registry_with_items([
        Item::new("rope").with_tag("tool"),
        Item::new("key").with_tags(["tool", "brass"]),
    ]);
    let pipeline = parse_line(r#"select where has "brass" first name"#, &registry, &ParseOptions::new()).unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), Some(Value::text("key")));
}

#[test]
fn print_writes_lines() {
    let registry = standard_registry();
    let pipeline = parse_line("select first print name print", &registry, &ParseOptions::new()).unwrap();
    let mut ctx = BufferedContext::new();
    pipeline.invoke(Value::Unit, &mut ctx);
    assert_eq!(ctx.lines(), ["lamp [brass, light]", "lamp"]);
}

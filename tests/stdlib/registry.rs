//! Integration tests for the command registry

use tether_foundation::{Type, Value};
use tether_language::{BufferedContext, Catalog, ParseOptions, parse_line};
use tether_stdlib::{CommandDef, CommandRegistry, InputPattern, Param, ReturnRule, standard_registry};

#[test]
fn standard_registry_lists_commands() {
    let registry = standard_registry();
    let names = registry.names();
    for expected in ["count", "filter", "greet", "map", "num", "print", "select", "where"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(registry.command("nope").is_none());
}

#[test]
fn describe_gives_usage_and_summary() {
    let registry = standard_registry();
    let described = registry.describe();
    assert_eq!(described.len(), registry.len());
    let (usage, summary) = described
        .iter()
        .find(|(usage, _)| usage.starts_with("join"))
        .unwrap();
    assert_eq!(usage, "join [sep]");
    assert!(!summary.is_empty());
}

#[test]
fn custom_commands_plug_in() {
    let registry = CommandRegistry::new()
        .with(
            CommandDef::new("seven", "Produce seven").overload(
                InputPattern::Exact(Type::Unit),
                ReturnRule::Fixed(Type::Number),
                |_, _, _| Ok(Value::Number(7.0)),
            ),
        )
        .with(
            CommandDef::new("scale", "Multiply by a factor")
                .with_param(Param::number("by"))
                .overload(
                    InputPattern::Exact(Type::Number),
                    ReturnRule::Fixed(Type::Number),
                    |bundle, value, _| {
                        let by = bundle.arguments.number("by").unwrap_or(1.0);
                        Ok(Value::Number(value.as_number().unwrap_or(0.0) * by))
                    },
                ),
        );

    let pipeline = parse_line("seven scale 3", &registry, &ParseOptions::new()).unwrap();
    let mut ctx = BufferedContext::new();
    assert_eq!(pipeline.invoke(Value::Unit, &mut ctx), Some(Value::Number(21.0)));
    assert!(parse_line("greet", &registry, &ParseOptions::new()).is_err());
}

#[test]
fn registering_again_replaces() {
    let mut registry = CommandRegistry::new();
    registry.register(CommandDef::new("x", "first"));
    registry.register(CommandDef::new("x", "second"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("x").map(CommandDef::summary), Some("second"));
}

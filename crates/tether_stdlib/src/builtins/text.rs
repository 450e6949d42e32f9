//! Text commands.

use tether_foundation::{Type, Value};

use super::{count_value, list_in, text_arg, text_in};
use crate::command::{CommandDef, InputPattern, ReturnRule};
use crate::grammar::Param;
use crate::registry::CommandRegistry;

/// Registers the text commands.
pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDef::new("greet", "Produce a greeting").overload(
            InputPattern::Exact(Type::Unit),
            ReturnRule::Fixed(Type::Text),
            |_, _, _| Ok(Value::text("Hello, world!")),
        ),
    );

    registry.register(
        CommandDef::new("echo", "Produce the given text")
            .with_param(Param::text("text"))
            .overload(
                InputPattern::Exact(Type::Unit),
                ReturnRule::Fixed(Type::Text),
                |bundle, _, _| Ok(Value::text(text_arg(bundle, "text")?)),
            ),
    );

    registry.register(
        CommandDef::new("upper", "Convert text to upper case").overload(
            InputPattern::Exact(Type::Text),
            ReturnRule::Fixed(Type::Text),
            |_, value, _| Ok(Value::text(text_in(&value)?.to_uppercase())),
        ),
    );

    registry.register(
        CommandDef::new("lower", "Convert text to lower case").overload(
            InputPattern::Exact(Type::Text),
            ReturnRule::Fixed(Type::Text),
            |_, value, _| Ok(Value::text(text_in(&value)?.to_lowercase())),
        ),
    );

    registry.register(
        CommandDef::new("len", "Count characters in text or elements in a list")
            .overload(
                InputPattern::Exact(Type::Text),
                ReturnRule::Fixed(Type::Number),
                |_, value, _| Ok(count_value(text_in(&value)?.chars().count())),
            )
            .overload(
                InputPattern::AnyList,
                ReturnRule::Fixed(Type::Number),
                |_, value, _| Ok(count_value(list_in(&value)?.len())),
            ),
    );

    registry.register(
        CommandDef::new("join", "Join a list of text with a separator (default \" \")")
            .with_param(Param::text("sep").optional())
            .overload(
                InputPattern::Exact(Type::list(Type::Text)),
                ReturnRule::Fixed(Type::Text),
                |bundle, value, _| {
                    let sep = bundle.arguments.text("sep").unwrap_or(" ");
                    let parts: Vec<&str> = list_in(&value)?
                        .iter()
                        .filter_map(Value::as_text)
                        .collect();
                    Ok(Value::text(parts.join(sep)))
                },
            ),
    );

    registry.register(
        CommandDef::new("split", "Split text on a separator (default whitespace)")
            .with_param(Param::text("sep").optional())
            .overload(
                InputPattern::Exact(Type::Text),
                ReturnRule::Fixed(Type::list(Type::Text)),
                |bundle, value, _| {
                    let text = text_in(&value)?;
                    let parts: Vec<Value> = match bundle.arguments.text("sep") {
                        Some(sep) if !sep.is_empty() => text.split(sep).map(Value::from).collect(),
                        _ => text.split_whitespace().map(Value::from).collect(),
                    };
                    Ok(Value::list(Type::Text, parts))
                },
            ),
    );

    registry.register(
        CommandDef::new("contains", "Test whether text contains a substring")
            .with_param(Param::text("needle"))
            .overload(
                InputPattern::Exact(Type::Text),
                ReturnRule::Fixed(Type::Bool),
                |bundle, value, _| {
                    let hit = text_in(&value)?.contains(text_arg(bundle, "needle")?);
                    Ok(Value::Bool(bundle.apply_inversion(hit)))
                },
            ),
    );
}

//! Item commands.

use im::Vector;

use tether_foundation::{Type, Value};

use super::{item_in, list_in, text_arg};
use crate::command::{CommandDef, InputPattern, ReturnRule};
use crate::grammar::Param;
use crate::registry::CommandRegistry;

/// Registers the item commands, with `items` as the set `select` produces.
pub(super) fn register(registry: &mut CommandRegistry, items: Vector<Value>) {
    let item_list = Type::list(Type::Item);

    registry.register(
        CommandDef::new("select", "Produce every known item").overload(
            InputPattern::Exact(Type::Unit),
            ReturnRule::Fixed(item_list.clone()),
            move |_, _, _| {
                Ok(Value::List {
                    element: Type::Item,
                    items: items.clone(),
                })
            },
        ),
    );

    registry.register(
        CommandDef::new("filter", "Keep items by tag or by name")
            .with_subcommands(&["bytag", "byname"])
            .invertible()
            .with_param(Param::text("value"))
            .overload_for(
                "bytag",
                InputPattern::Exact(item_list.clone()),
                ReturnRule::SameAsInput,
                |bundle, value, _| {
                    let tag = text_arg(bundle, "value")?;
                    keep_items(&value, |item| bundle.apply_inversion(item.has_tag(tag)))
                },
            )
            .overload_for(
                "byname",
                InputPattern::Exact(item_list),
                ReturnRule::SameAsInput,
                |bundle, value, _| {
                    let name = text_arg(bundle, "value")?;
                    keep_items(&value, |item| bundle.apply_inversion(item.name() == name))
                },
            ),
    );

    registry.register(
        CommandDef::new("name", "Get an item's name").overload(
            InputPattern::Exact(Type::Item),
            ReturnRule::Fixed(Type::Text),
            |_, value, _| Ok(Value::text(item_in(&value)?.name())),
        ),
    );

    registry.register(
        CommandDef::new("tags", "Get an item's tags").overload(
            InputPattern::Exact(Type::Item),
            ReturnRule::Fixed(Type::list(Type::Text)),
            |_, value, _| {
                let tags = item_in(&value)?.tags().map(Value::from);
                Ok(Value::list(Type::Text, tags))
            },
        ),
    );

    registry.register(
        CommandDef::new("has", "Test whether an item carries a tag")
            .with_param(Param::text("tag"))
            .overload(
                InputPattern::Exact(Type::Item),
                ReturnRule::Fixed(Type::Bool),
                |bundle, value, _| {
                    let hit = item_in(&value)?.has_tag(text_arg(bundle, "tag")?);
                    Ok(Value::Bool(bundle.apply_inversion(hit)))
                },
            ),
    );
}

fn keep_items(
    value: &Value,
    keep: impl Fn(&tether_foundation::Item) -> bool,
) -> tether_language::CommandResult {
    let kept = list_in(value)?
        .iter()
        .filter(|v| v.as_item().is_some_and(&keep))
        .cloned();
    Ok(Value::list(Type::Item, kept))
}

//! Generic list commands.
//!
//! `where`, `map`, `any` and `all` take a block that is evaluated once per
//! element. Errors from the block stop the enclosing pipeline.

use tether_foundation::{Diagnostic, Type, Value};

use super::{block_arg, count_value, element_type, evaluate_each, list_in, report, test_each};
use crate::command::{CommandDef, InputPattern, ReturnRule};
use crate::grammar::Param;
use crate::registry::CommandRegistry;

/// Registers the list commands.
pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDef::new("count", "Count the elements of a list").overload(
            InputPattern::AnyList,
            ReturnRule::Fixed(Type::Number),
            |_, value, _| Ok(count_value(list_in(&value)?.len())),
        ),
    );

    registry.register(
        CommandDef::new("first", "Take the first element of a list").overload(
            InputPattern::AnyList,
            ReturnRule::ElementOfInput,
            |_, value, ctx| {
                if let Some(first) = list_in(&value)?.front() {
                    return Ok(first.clone());
                }
                ctx.report_error(Diagnostic::command("first: the list is empty"));
                Ok(Value::Unit)
            },
        ),
    );

    registry.register(
        CommandDef::new("reverse", "Reverse a list").overload(
            InputPattern::AnyList,
            ReturnRule::SameAsInput,
            |bundle, value, _| {
                let items = list_in(&value)?;
                Ok(Value::list(element_type(bundle), items.iter().rev().cloned()))
            },
        ),
    );

    registry.register(
        CommandDef::new("where", "Keep the elements matching a predicate")
            .with_param(Param::predicate("predicate"))
            .overload(
                InputPattern::AnyList,
                ReturnRule::SameAsInput,
                |bundle, value, ctx| {
                    let block = block_arg(bundle, "predicate")?;
                    let items = list_in(&value)?;
                    match test_each(block, items, ctx) {
                        Ok(keep) => Ok(Value::list(
                            element_type(bundle),
                            items
                                .iter()
                                .zip(keep)
                                .filter(|(_, keep)| *keep)
                                .map(|(item, _)| item.clone()),
                        )),
                        Err(diagnostic) => report(ctx, diagnostic),
                    }
                },
            ),
    );

    registry.register(
        CommandDef::new("map", "Transform each element with a block")
            .with_param(Param::projection("projection"))
            .overload(
                InputPattern::AnyList,
                ReturnRule::ListOfTypeArg(0),
                |bundle, value, ctx| {
                    let block = block_arg(bundle, "projection")?;
                    let element = bundle.type_args.first().cloned().unwrap_or(Type::Unit);
                    match evaluate_each(block, list_in(&value)?, ctx) {
                        Ok(mapped) => Ok(Value::list(element, mapped)),
                        Err(diagnostic) => report(ctx, diagnostic),
                    }
                },
            ),
    );

    registry.register(
        CommandDef::new("any", "Test whether any element matches a predicate")
            .with_param(Param::predicate("predicate"))
            .overload(
                InputPattern::AnyList,
                ReturnRule::Fixed(Type::Bool),
                |bundle, value, ctx| {
                    let block = block_arg(bundle, "predicate")?;
                    match test_each(block, list_in(&value)?, ctx) {
                        Ok(results) => Ok(Value::Bool(
                            bundle.apply_inversion(results.into_iter().any(|hit| hit)),
                        )),
                        Err(diagnostic) => report(ctx, diagnostic),
                    }
                },
            ),
    );

    registry.register(
        CommandDef::new("all", "Test whether every element matches a predicate")
            .with_param(Param::predicate("predicate"))
            .overload(
                InputPattern::AnyList,
                ReturnRule::Fixed(Type::Bool),
                |bundle, value, ctx| {
                    let block = block_arg(bundle, "predicate")?;
                    match test_each(block, list_in(&value)?, ctx) {
                        Ok(results) => Ok(Value::Bool(
                            bundle.apply_inversion(results.into_iter().all(|hit| hit)),
                        )),
                        Err(diagnostic) => report(ctx, diagnostic),
                    }
                },
            ),
    );
}

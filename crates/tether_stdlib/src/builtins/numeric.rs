//! Numeric commands.

use tether_foundation::{Diagnostic, Type, Value};
use tether_language::{Bundle, CommandResult, HostContext};

use super::{list_in, number_arg, number_in};
use crate::command::{CommandDef, InputPattern, ReturnRule};
use crate::grammar::Param;
use crate::registry::CommandRegistry;

/// Largest list `range` will build.
pub const MAX_RANGE: f64 = 1_000_000.0;

/// Registers the numeric commands.
pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDef::new("num", "Produce a number")
            .with_param(Param::number("n"))
            .overload(
                InputPattern::Exact(Type::Unit),
                ReturnRule::Fixed(Type::Number),
                |bundle, _, _| Ok(Value::Number(number_arg(bundle, "n")?)),
            ),
    );

    register_arithmetic(registry, "add", "Add a number", |a, b| Some(a + b));
    register_arithmetic(registry, "sub", "Subtract a number", |a, b| Some(a - b));
    register_arithmetic(registry, "mul", "Multiply by a number", |a, b| Some(a * b));
    register_arithmetic(registry, "div", "Divide by a number", |a, b| {
        (b != 0.0).then(|| a / b)
    });

    register_comparison(registry, "gt", "Test whether the input is greater", |a, b| a > b);
    register_comparison(registry, "lt", "Test whether the input is less", |a, b| a < b);
    #[allow(clippy::float_cmp)]
    register_comparison(registry, "eq", "Test whether the input is equal", |a, b| a == b);

    registry.register(
        CommandDef::new("range", "Produce the numbers 0 up to n (exclusive)")
            .with_param(Param::number("n"))
            .overload(
                InputPattern::Exact(Type::Unit),
                ReturnRule::Fixed(Type::list(Type::Number)),
                range,
            ),
    );

    registry.register(
        CommandDef::new("sum", "Add up a list of numbers").overload(
            InputPattern::Exact(Type::list(Type::Number)),
            ReturnRule::Fixed(Type::Number),
            |_, value, _| {
                let total = list_in(&value)?.iter().filter_map(Value::as_number).sum();
                Ok(Value::Number(total))
            },
        ),
    );
}

fn register_arithmetic(
    registry: &mut CommandRegistry,
    name: &'static str,
    summary: &str,
    op: fn(f64, f64) -> Option<f64>,
) {
    registry.register(
        CommandDef::new(name, summary)
            .with_param(Param::number("n"))
            .overload(
                InputPattern::Exact(Type::Number),
                ReturnRule::Fixed(Type::Number),
                move |bundle, value, ctx| {
                    let lhs = number_in(&value)?;
                    let rhs = number_arg(bundle, "n")?;
                    match op(lhs, rhs) {
                        Some(result) => Ok(Value::Number(result)),
                        None => {
                            ctx.report_error(Diagnostic::command(format!(
                                "{name}: division by zero"
                            )));
                            Ok(Value::Unit)
                        }
                    }
                },
            ),
    );
}

fn register_comparison(
    registry: &mut CommandRegistry,
    name: &str,
    summary: &str,
    op: fn(f64, f64) -> bool,
) {
    registry.register(
        CommandDef::new(name, summary)
            .with_param(Param::number("n"))
            .overload(
                InputPattern::Exact(Type::Number),
                ReturnRule::Fixed(Type::Bool),
                move |bundle, value, _| {
                    let outcome = op(number_in(&value)?, number_arg(bundle, "n")?);
                    Ok(Value::Bool(bundle.apply_inversion(outcome)))
                },
            ),
    );
}

fn range(bundle: &Bundle, _: Value, ctx: &mut dyn HostContext) -> CommandResult {
    let n = number_arg(bundle, "n")?;
    if n < 0.0 || n.fract() != 0.0 || n > MAX_RANGE {
        ctx.report_error(Diagnostic::command(format!(
            "range: expected a whole number between 0 and {MAX_RANGE}, got {n}"
        )));
        return Ok(Value::Unit);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end = n as u32;
    Ok(Value::list(
        Type::Number,
        (0..end).map(|i| Value::Number(f64::from(i))),
    ))
}

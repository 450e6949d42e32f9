//! Output commands.

use crate::command::{CommandDef, InputPattern, ReturnRule};
use crate::registry::CommandRegistry;

/// Registers the output commands.
pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDef::new("print", "Write the value as a line and pass it on").overload(
            InputPattern::Any,
            ReturnRule::SameAsInput,
            |_, value, ctx| {
                ctx.write_line(&value.to_string());
                Ok(value)
            },
        ),
    );
}

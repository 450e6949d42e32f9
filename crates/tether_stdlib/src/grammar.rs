//! Declarative argument grammar for registry commands.
//!
//! Each parameter consumes exactly one token: a number, a string or bare
//! word, or a block. Optional parameters are attempted under a checkpoint
//! and skipped when they do not parse. A bare word that names a command is
//! never taken as an optional argument, so it starts the next stage instead.

use std::fmt;
use std::sync::Arc;

use tether_foundation::{Diagnostic, Result, Span, Type};
use tether_language::{
    Argument, ArgumentContext, Block, Cursor, NOT_KEYWORD, ParsedArguments, is_name_char,
};

// =============================================================================
// Param
// =============================================================================

/// What kind of token a parameter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A signed decimal literal.
    Number,
    /// A double-quoted string or a bare word.
    Text,
    /// A block over the element type that must produce `Bool`.
    Predicate,
    /// A block over the element type; its result type becomes a type argument.
    Projection,
}

/// A parameter in a command's argument grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// The name the bound argument is stored under.
    pub name: String,
    /// The accepted token kind.
    pub kind: ParamKind,
    /// Whether the parameter may be omitted.
    pub optional: bool,
}

impl Param {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// A numeric parameter.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Number)
    }

    /// A text parameter.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Text)
    }

    /// A predicate block parameter.
    #[must_use]
    pub fn predicate(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Predicate)
    }

    /// A projection block parameter.
    #[must_use]
    pub fn projection(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Projection)
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "<{}>", self.name)
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a parameter list from the cursor.
///
/// When `invertible` is set, a `not` before the first parameter is accepted
/// and reported through [`ParsedArguments::inverted`].
///
/// # Errors
///
/// Returns `OutOfInput` when a required parameter is missing at the end of
/// the input, and `InvalidArgument` (or a nested block's error) otherwise.
pub fn parse_params(
    cursor: &mut Cursor,
    params: &[Param],
    invertible: bool,
    context: &ArgumentContext<'_>,
) -> Result<ParsedArguments> {
    let mut parsed = ParsedArguments::default();

    if invertible
        && cursor
            .peek_word(is_name_char)
            .is_some_and(|word| word.text == NOT_KEYWORD)
    {
        cursor.get_word(is_name_char);
        parsed.inverted = true;
    }

    for param in params {
        let result = cursor.attempt(|cursor| {
            cursor.skip_whitespace();
            parse_param(cursor, param, context)
        });

        match result {
            Ok((argument, type_arg)) => {
                parsed.arguments.push(param.name.clone(), argument);
                parsed.type_args.extend(type_arg);
            }
            Err(_) if param.optional => {}
            Err(error) => return Err(error),
        }
    }

    Ok(parsed)
}

fn parse_param(
    cursor: &mut Cursor,
    param: &Param,
    context: &ArgumentContext<'_>,
) -> Result<(Argument, Option<Type>)> {
    match param.kind {
        ParamKind::Number => Ok((Argument::Number(parse_number(cursor)?), None)),
        ParamKind::Text => {
            let text = parse_text(cursor, param.optional.then_some(context))?;
            Ok((Argument::Text(text), None))
        }
        ParamKind::Predicate => {
            let element = context.piped.element().unwrap_or(context.piped);
            let block = Block::parse(cursor, context.catalog, element, Some(&Type::Bool))?;
            Ok((Argument::Block(Arc::new(block)), None))
        }
        ParamKind::Projection => {
            let element = context.piped.element().unwrap_or(context.piped);
            let block = Block::parse(cursor, context.catalog, element, None)?;
            let produced = block.return_type().clone();
            Ok((Argument::Block(Arc::new(block)), Some(produced)))
        }
    }
}

/// Describes the token at the cursor for an error message.
fn next_token(cursor: &Cursor) -> (String, Span) {
    cursor
        .peek_word(|c| !c.is_whitespace())
        .map_or_else(|| (String::new(), Span::at(cursor.offset())), |w| (w.text, w.span))
}

fn missing(cursor: &Cursor, expected: &str) -> Diagnostic {
    if cursor.is_at_end() {
        return Diagnostic::out_of_input(expected).at(Span::at(cursor.offset()));
    }
    let (found, span) = next_token(cursor);
    Diagnostic::invalid_argument(expected, found).at(span)
}

/// Reads a signed decimal literal.
///
/// # Errors
///
/// Returns `OutOfInput` at the end of the input, `InvalidArgument` otherwise.
/// The cursor is restored when no number is found.
pub fn parse_number(cursor: &mut Cursor) -> Result<f64> {
    let checkpoint = cursor.save();
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(cursor.peek_char(), Some('-' | '+')) {
        cursor.get_char();
    }
    while let Some(c) = cursor.peek_char() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        cursor.get_char();
    }

    let ends_word = cursor.peek_char().is_none_or(|c| !is_name_char(c));
    if !seen_digit || !ends_word {
        cursor.restore(checkpoint);
        return Err(missing(cursor, "a number"));
    }

    let span = cursor.span_from(checkpoint.offset());
    let text = span.text(cursor.source());
    text.parse()
        .map_err(|_| Diagnostic::invalid_argument("a number", text).at(span))
}

/// Reads a quoted string or a bare word.
///
/// With a context, bare words naming a command are rejected.
fn parse_text(cursor: &mut Cursor, reject_commands: Option<&ArgumentContext<'_>>) -> Result<Arc<str>> {
    if cursor.peek_char() == Some('"') {
        return parse_quoted(cursor).map(Into::into);
    }

    match cursor.peek_word(is_name_char) {
        Some(word)
            if reject_commands.is_some_and(|ctx| ctx.catalog.command(&word.text).is_some()) =>
        {
            Err(Diagnostic::invalid_argument("text", word.text).at(word.span))
        }
        Some(word) => {
            cursor.get_word(is_name_char);
            Ok(word.text.into())
        }
        None => Err(missing(cursor, "text")),
    }
}

/// Reads a double-quoted string with `\"`, `\\`, `\n`, `\r` and `\t` escapes.
///
/// # Errors
///
/// An unterminated string is out of input; an unknown escape is invalid.
pub fn parse_quoted(cursor: &mut Cursor) -> Result<String> {
    if !cursor.eat_match('"') {
        return Err(missing(cursor, "a quoted string"));
    }

    let mut text = String::new();
    loop {
        let escape_start = cursor.offset();
        match cursor.get_char() {
            Some('"') => return Ok(text),
            Some('\\') => match cursor.get_char() {
                Some('n') => text.push('\n'),
                Some('r') => text.push('\r'),
                Some('t') => text.push('\t'),
                Some('\\') => text.push('\\'),
                Some('"') => text.push('"'),
                Some(c) => {
                    return Err(Diagnostic::invalid_argument("a valid escape", format!("\\{c}"))
                        .at(cursor.span_from(escape_start)));
                }
                None => break,
            },
            Some(c) => text.push(c),
            None => break,
        }
    }

    Err(Diagnostic::out_of_input("a closing '\"'").at(Span::at(cursor.offset())))
}

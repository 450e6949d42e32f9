//! Blocks: pipelines embedded as a single argument.
//!
//! A braced block holds a full chained pipeline. Without braces, the block is
//! exactly one stage, so that an argument grammar never swallows the stages
//! that follow its command.

use tether_foundation::{Diagnostic, DiagnosticKind, Result, Span, Type, Value};

use crate::catalog::Catalog;
use crate::context::HostContext;
use crate::cursor::Cursor;
use crate::pipeline::{ParseOptions, Pipeline};

/// A pipeline used as a sub-expression.
#[derive(Clone, Debug)]
pub struct Block {
    pipeline: Pipeline,
    braced: bool,
    span: Span,
}

impl Block {
    /// Parses a block against the piped type, optionally requiring a target type.
    ///
    /// # Errors
    ///
    /// Returns [`MissingClosingBrace`](tether_foundation::DiagnosticKind::MissingClosingBrace)
    /// when a `{` has no matching `}`, or any error from the inner pipeline.
    pub fn parse(
        cursor: &mut Cursor,
        catalog: &dyn Catalog,
        piped: &Type,
        target: Option<&Type>,
    ) -> Result<Self> {
        cursor.attempt(|cursor| {
            cursor.skip_whitespace();
            let start = cursor.offset();
            let braced = cursor.eat_match('{');
            let open = Span::new(start, cursor.offset());

            if braced && !has_closing_brace(cursor.rest()) {
                return Err(Diagnostic::missing_closing_brace().at(open));
            }

            let mut options = ParseOptions::new().with_piped(piped.clone());
            if let Some(target) = target {
                options = options.with_target(target.clone());
            }
            if !braced {
                options = options.once();
            }
            let pipeline = Pipeline::parse(cursor, catalog, &options).map_err(|error| {
                if braced {
                    stopped_inside_braces(error, cursor.source())
                } else {
                    error
                }
            })?;

            if braced {
                cursor.skip_whitespace();
                if !cursor.eat_match('}') {
                    return Err(match cursor.peek_word(|c| !c.is_whitespace()) {
                        Some(word) => Diagnostic::invalid_argument("'}'", word.text).at(word.span),
                        None => Diagnostic::missing_closing_brace().at(open),
                    });
                }
            }

            Ok(Self {
                pipeline,
                braced,
                span: cursor.span_from(start),
            })
        })
    }

    /// Returns the inner pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns true if the block was written with braces.
    #[must_use]
    pub const fn is_braced(&self) -> bool {
        self.braced
    }

    /// Returns the block's span, braces included.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the static type the block produces.
    #[must_use]
    pub const fn return_type(&self) -> &Type {
        self.pipeline.return_type()
    }

    /// Runs the inner pipeline. See [`Pipeline::run`].
    ///
    /// # Errors
    ///
    /// Returns the first diagnostic any stage reported.
    pub fn run(&self, input: Value, ctx: &mut dyn HostContext) -> Result<Value> {
        self.pipeline.run(input, ctx)
    }

    /// Invokes the inner pipeline. See [`Pipeline::invoke`].
    pub fn invoke(&self, input: Value, ctx: &mut dyn HostContext) -> Option<Value> {
        self.pipeline.invoke(input, ctx)
    }
}

/// Turns an out-of-input error raised before the end of the line into the
/// token it actually stopped at.
///
/// Inside braces the closing `}` is known to follow, so running out of input
/// there means a stage could not start at that token. Left as out-of-input,
/// the enclosing pipeline would treat it as a clean stop.
fn stopped_inside_braces(error: Diagnostic, source: &str) -> Diagnostic {
    let (DiagnosticKind::OutOfInput { expected }, Some(span)) = (&error.kind, error.span) else {
        return error;
    };
    if span.start >= source.len() {
        return error;
    }
    let found: String = source[span.start..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    let at = Span::new(span.start, span.start + found.len());
    Diagnostic::invalid_argument(expected.clone(), found).at(at)
}

/// Returns true if `rest` contains a `}` closing an already-open brace.
///
/// Nested braces are balanced and quoted strings are skipped.
fn has_closing_brace(rest: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '{' => depth += 1,
            '}' if depth == 0 => return true,
            '}' => depth -= 1,
            _ => {}
        }
    }
    false
}

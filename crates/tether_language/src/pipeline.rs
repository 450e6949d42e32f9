//! Pipeline building and invocation.
//!
//! A pipeline is a maximal chain of stages where each stage is resolved
//! against the previous stage's static return type. Parsing stops cleanly when
//! the next stage simply runs out of input, when a target type is reached, or
//! after the first stage in `once` mode.

use std::sync::Arc;

use tracing::debug;

use tether_foundation::{Diagnostic, Result, Span, Type, Value};

use crate::catalog::Catalog;
use crate::context::HostContext;
use crate::cursor::Cursor;
use crate::stage::Stage;

/// Options controlling how a pipeline is parsed.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Type piped into the first stage.
    pub piped: Type,
    /// Required final type, if any.
    pub target: Option<Type>,
    /// Parse exactly one stage.
    pub once: bool,
    /// Accept a pipeline with no stages.
    pub allow_empty: bool,
}

impl ParseOptions {
    /// Creates default options: no input, no target, chaining allowed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type piped into the first stage.
    #[must_use]
    pub fn with_piped(mut self, piped: Type) -> Self {
        self.piped = piped;
        self
    }

    /// Requires the pipeline to end with the given type.
    #[must_use]
    pub fn with_target(mut self, target: Type) -> Self {
        self.target = Some(target);
        self
    }

    /// Limits the pipeline to a single stage.
    #[must_use]
    pub const fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Accepts an empty pipeline, which returns its input unchanged.
    #[must_use]
    pub const fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// A parsed, type-checked chain of stages.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
    source: Arc<str>,
    once: bool,
    piped: Type,
    return_type: Type,
    span: Span,
}

impl Pipeline {
    /// Parses a pipeline starting at the cursor.
    ///
    /// # Errors
    ///
    /// Fails with the last stage error unless that error is running out of
    /// input after at least one stage parsed. Fails with
    /// [`ExpressionOfWrongType`](tether_foundation::DiagnosticKind::ExpressionOfWrongType)
    /// when a target type is required and not met. The cursor is restored
    /// on failure.
    pub fn parse(cursor: &mut Cursor, catalog: &dyn Catalog, options: &ParseOptions) -> Result<Self> {
        cursor.attempt(|cursor| Self::build(cursor, catalog, options))
    }

    fn build(cursor: &mut Cursor, catalog: &dyn Catalog, options: &ParseOptions) -> Result<Self> {
        let mut stages: Vec<Stage> = Vec::new();
        let mut piped = options.piped.clone();
        let mut failure = None;

        while !options.once || stages.is_empty() {
            match Stage::parse(cursor, catalog, &piped) {
                Ok(stage) => {
                    piped = stage.return_type().clone();
                    stages.push(stage);
                    if options.target.as_ref() == Some(&piped) {
                        break;
                    }
                }
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        if let Some(error) = failure {
            if !error.is_out_of_input() || (stages.is_empty() && !options.allow_empty) {
                return Err(error);
            }
        }

        let span = match (stages.first(), stages.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::at(cursor.offset()),
        };

        if let Some(target) = &options.target {
            if *target != piped {
                return Err(Diagnostic::wrong_type(target.clone(), piped, options.once).at(span));
            }
        }

        debug!(
            stages = stages.len(),
            once = options.once,
            returns = %piped,
            "built pipeline"
        );

        Ok(Self {
            stages,
            source: Arc::clone(cursor.source()),
            once: options.once,
            piped: options.piped.clone(),
            return_type: piped,
            span,
        })
    }

    /// Returns the stages in source order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns true if the pipeline was parsed in single-stage mode.
    #[must_use]
    pub const fn is_once(&self) -> bool {
        self.once
    }

    /// Returns the source line the pipeline was parsed from.
    #[must_use]
    pub const fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Returns the span covering every stage.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the type piped into the first stage.
    #[must_use]
    pub const fn piped_type(&self) -> &Type {
        &self.piped
    }

    /// Returns the static type of the pipeline's result.
    #[must_use]
    pub const fn return_type(&self) -> &Type {
        &self.return_type
    }

    /// Threads `input` through every stage.
    ///
    /// After each stage the context is drained of reported errors. The first
    /// one is contextualized with this pipeline's source and the stage's span
    /// and returned; remaining stages never run.
    ///
    /// # Errors
    ///
    /// Returns the first diagnostic reported during invocation.
    pub fn run(&self, input: Value, ctx: &mut dyn HostContext) -> Result<Value> {
        let mut value = input;
        for stage in &self.stages {
            debug!(command = stage.name(), "invoking stage");
            value = stage.invoke(value, ctx);

            let mut errors = ctx.take_errors().into_iter();
            if let Some(first) = errors.next() {
                for extra in errors {
                    debug!(error = %extra, "dropping additional error");
                }
                return Err(first.contextualized(&self.source, stage.span()));
            }
        }
        Ok(value)
    }

    /// Invokes the pipeline at the host boundary.
    ///
    /// On failure the rendered diagnostic is written to the context and no
    /// value is returned.
    pub fn invoke(&self, input: Value, ctx: &mut dyn HostContext) -> Option<Value> {
        match self.run(input, ctx) {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                ctx.write_diagnostic(&diagnostic);
                None
            }
        }
    }
}

/// Parses a whole line as one pipeline.
///
/// Only whitespace may follow the pipeline. Every diagnostic returned is
/// contextualized with the line.
///
/// # Errors
///
/// Returns the pipeline's parse error, or an error describing leftover text.
pub fn parse_line(source: &str, catalog: &dyn Catalog, options: &ParseOptions) -> Result<Pipeline> {
    let mut cursor = Cursor::new(source);
    let source = Arc::clone(cursor.source());
    let whole = Span::new(0, source.len());

    let pipeline = Pipeline::parse(&mut cursor, catalog, options)
        .map_err(|error| error.contextualized(&source, whole))?;

    cursor.skip_whitespace();
    if cursor.is_at_end() {
        return Ok(pipeline);
    }

    Err(trailing_error(&cursor, catalog, pipeline.return_type()).contextualized(&source, whole))
}

/// Explains why parsing stopped before the end of the line.
///
/// Retrying a stage at the leftover text recovers the specific error the
/// pipeline loop swallowed as a clean stop.
fn trailing_error(cursor: &Cursor, catalog: &dyn Catalog, piped: &Type) -> Diagnostic {
    let end = cursor.source().len();
    let expected = match Stage::parse(&mut cursor.clone(), catalog, piped) {
        Err(error) if !error.is_out_of_input() => return error,
        Err(error) if error.span.is_some_and(|span| span.start >= end) => return error,
        Err(_) => "a command name",
        Ok(_) => "end of input",
    };

    match cursor.peek_word(|c| !c.is_whitespace()) {
        Some(word) => Diagnostic::invalid_argument(expected, word.text).at(word.span),
        None => Diagnostic::out_of_input(expected).at(Span::at(end)),
    }
}

//! Text cursor for pipeline parsing.
//!
//! The cursor walks a single source line. Every speculative parse saves a
//! [`Checkpoint`] and restores it on failure; [`Cursor::attempt`] packages that
//! pattern so the restore cannot be forgotten.

use std::sync::Arc;

use tether_foundation::Span;

/// A saved cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Returns the saved byte offset.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.0
    }
}

/// A word read from the source, with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    /// The word text.
    pub text: String,
    /// Where the word sits in the source.
    pub span: Span,
}

/// Stateful cursor over an immutable source line.
#[derive(Clone, Debug)]
pub struct Cursor {
    /// Source text being parsed.
    source: Arc<str>,
    /// Current byte offset in source.
    offset: usize,
}

impl Cursor {
    /// Creates a cursor at the start of the given source.
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            offset: 0,
        }
    }

    /// Returns the full source text.
    #[must_use]
    pub const fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the unconsumed remainder of the source.
    #[must_use]
    pub fn rest(&self) -> &str {
        &self.source[self.offset..]
    }

    /// Returns true if the whole source has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Returns the span from `start` to the current offset.
    #[must_use]
    pub const fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.offset)
    }

    /// Peeks at the next character without consuming it.
    #[must_use]
    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn get_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it equals `expected`.
    pub fn eat_match(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skips a maximal run of characters matching `predicate`.
    pub fn consume(&mut self, predicate: impl Fn(char) -> bool) {
        self.offset += self.run_length(&predicate);
    }

    /// Skips whitespace.
    pub fn skip_whitespace(&mut self) {
        self.consume(char::is_whitespace);
    }

    /// Consumes and returns a maximal non-empty run matching `predicate`.
    ///
    /// Returns `None` without moving when the cursor is at the end or the
    /// next character does not match.
    pub fn get_word(&mut self, predicate: impl Fn(char) -> bool) -> Option<Word> {
        let word = self.peek_word(predicate)?;
        self.offset = word.span.end;
        Some(word)
    }

    /// Like [`Cursor::get_word`], but does not consume.
    #[must_use]
    pub fn peek_word(&self, predicate: impl Fn(char) -> bool) -> Option<Word> {
        let len = self.run_length(&predicate);
        if len == 0 {
            return None;
        }
        let end = self.offset + len;
        Some(Word {
            text: self.source[self.offset..end].to_string(),
            span: Span::new(self.offset, end),
        })
    }

    /// Saves the current position.
    #[must_use]
    pub const fn save(&self) -> Checkpoint {
        Checkpoint(self.offset)
    }

    /// Restores a previously saved position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.0;
    }

    /// Runs a speculative parse, restoring the cursor if it fails.
    ///
    /// On `Ok` the cursor stays wherever `parse` left it.
    ///
    /// # Errors
    ///
    /// Returns whatever error `parse` returns, after restoring the cursor.
    pub fn attempt<T, E>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let checkpoint = self.save();
        let result = parse(self);
        if result.is_err() {
            self.restore(checkpoint);
        }
        result
    }

    /// Byte length of the run matching `predicate` at the cursor.
    fn run_length(&self, predicate: &impl Fn(char) -> bool) -> usize {
        self.rest()
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(self.rest().len(), |(i, _)| i)
    }
}

/// Returns true for characters allowed in command and subcommand names.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric()
}

//! Syntax highlighting for the REPL.

use std::borrow::Cow;
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

use tether_language::{NOT_KEYWORD, is_name_char};

const RESET: &str = "\x1b[0m";
const COMMAND: &str = "\x1b[1;32m";
const SUBCOMMAND: &str = "\x1b[36m";
const KEYWORD: &str = "\x1b[35m";
const STRING: &str = "\x1b[33m";
const NUMBER: &str = "\x1b[34m";
const BRACE: &str = "\x1b[1m";
const META: &str = "\x1b[2;3m";

/// Highlighter for pipeline syntax.
///
/// Words are only colored as commands when they name a command the
/// highlighter was told about.
#[derive(Debug, Default)]
pub struct PipelineHighlighter {
    commands: HashSet<String>,
}

impl PipelineHighlighter {
    /// Creates a highlighter that knows no commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a highlighter for the given command names.
    #[must_use]
    pub fn with_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut highlighter = Self::new();
        highlighter.set_commands(commands);
        highlighter
    }

    /// Replaces the known command names.
    pub fn set_commands<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
    }

    /// Highlight a line of input.
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str) -> Cow<'l, str> {
        if line.trim_start().starts_with(':') {
            return Cow::Owned(format!("{META}{line}{RESET}"));
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    result.push_str(STRING);
                    result.push(c);
                    push_string_body(&mut chars, &mut result);
                    result.push_str(RESET);
                }

                '{' | '}' => {
                    result.push_str(BRACE);
                    result.push(c);
                    result.push_str(RESET);
                }

                '-' if chars.peek().is_some_and(char::is_ascii_digit) => {
                    result.push_str(NUMBER);
                    result.push(c);
                    push_number_tail(&mut chars, &mut result);
                    result.push_str(RESET);
                }

                c if c.is_ascii_digit() => {
                    result.push_str(NUMBER);
                    result.push(c);
                    push_number_tail(&mut chars, &mut result);
                    result.push_str(RESET);
                }

                c if is_name_char(c) => {
                    let mut word = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }
                    self.push_word(&word, &mut chars, &mut result);
                }

                _ => result.push(c),
            }
        }

        Cow::Owned(result)
    }

    fn push_word(&self, word: &str, chars: &mut Peekable<Chars<'_>>, result: &mut String) {
        if word == NOT_KEYWORD {
            push_colored(result, KEYWORD, word);
        } else if self.commands.contains(word) {
            push_colored(result, COMMAND, word);
            if chars.peek() == Some(&':') {
                chars.next();
                let mut sub = String::from(":");
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    sub.push(next);
                    chars.next();
                }
                push_colored(result, SUBCOMMAND, &sub);
            }
        } else {
            result.push_str(word);
        }
    }
}

fn push_colored(result: &mut String, color: &str, text: &str) {
    result.push_str(color);
    result.push_str(text);
    result.push_str(RESET);
}

fn push_string_body(chars: &mut Peekable<Chars<'_>>, result: &mut String) {
    while let Some(c) = chars.next() {
        result.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    result.push(escaped);
                }
            }
            '"' => return,
            _ => {}
        }
    }
}

fn push_number_tail(chars: &mut Peekable<Chars<'_>>, result: &mut String) {
    while let Some(&next) = chars.peek() {
        if next.is_ascii_digit() || next == '.' {
            result.push(next);
            chars.next();
        } else {
            break;
        }
    }
}

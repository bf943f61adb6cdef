//! The tokenizing JSON parser.
//!
//! This module provides the [`Parser`], a character-driven push-down
//! automaton that walks the input once and reports structure to a caller
//! supplied [`EventSink`]. It never materializes a tree itself; pair it with
//! [`crate::TreeBuilder`] for that.
//!
//! # Examples
//!
//! ```rust
//! use jsonbind::{Parser, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! Parser::default()
//!     .parse(r#"{"key": [null, true, 3.14]}"#, &mut builder)
//!     .unwrap();
//! let root = builder.into_root().unwrap();
//! assert!(root.is_object());
//! ```

use alloc::{string::String, vec, vec::Vec};
use core::mem;

use crate::error::{Expected, ParseError};
use crate::options::ParserOptions;

/// Callbacks invoked by [`Parser::parse`] in document order.
///
/// One call is made per structural event: containers open and close, keys
/// precede the value they bind, and every scalar arrives as the raw text of
/// a single `primitive` call (quoting already stripped, escapes untouched).
pub trait EventSink {
    /// An object opened.
    fn begin_object(&mut self);
    /// The most recently opened object closed.
    fn end_object(&mut self);
    /// An array opened.
    fn begin_array(&mut self);
    /// The most recently opened array closed.
    fn end_array(&mut self);
    /// An object key completed; the next event is its value.
    fn key(&mut self, text: &str);
    /// A scalar value completed, as raw text.
    fn primitive(&mut self, text: &str);
}

const COMMA_OR_BRACE: &[char] = &[',', '}'];
const COMMA_OR_BRACKET: &[char] = &[',', ']'];
const COLON: &[char] = &[':'];

/// One entry of the parse stack.
///
/// The entry on top of the stack owns the current character; container
/// entries below it record what a closing delimiter must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Stack bottom; the document is complete when only this remains.
    Done,
    /// Expecting a value (at the root or after a colon).
    Value,
    /// Inside an object, expecting a key or `}`.
    Object,
    /// Inside an array, expecting a value or `]`.
    Array,
    /// Accumulating an unquoted key.
    BareKey,
    /// Accumulating a quoted key; the field is the closing quote.
    QuotedKey(char),
    /// Key complete, expecting `:`.
    Colon,
    /// Accumulating a quoted string value; the field is the closing quote.
    QuotedString(char),
    /// Accumulating a bare literal; the field is its starting index.
    Literal(usize),
    /// Value complete, expecting `,` or the enclosing close character.
    Delimiter,
}

/// The push-down parser.
///
/// Holds only read-only configuration; all per-call state lives on an
/// explicit stack created inside [`parse`](Self::parse), so one `Parser`
/// may be shared freely across calls and threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Creates a parser for the given dialect options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parses `text`, reporting every structural event to `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first malformed character, invalid
    /// literal, or premature end of input. Events already delivered to the
    /// sink are not rolled back.
    pub fn parse<S: EventSink>(&self, text: &str, sink: &mut S) -> Result<(), ParseError> {
        Machine::new(self.options, sink).run(text)
    }
}

/// Transient per-call construction state: the state stack plus the two
/// accumulator buffers.
struct Machine<'s, S> {
    options: ParserOptions,
    sink: &'s mut S,
    stack: Vec<State>,
    key_buf: String,
    value_buf: String,
    /// Single-character lookback used for escape detection in quoted text.
    prev: Option<char>,
}

impl<'s, S: EventSink> Machine<'s, S> {
    fn new(options: ParserOptions, sink: &'s mut S) -> Self {
        Self {
            options,
            sink,
            stack: vec![State::Done, State::Value],
            key_buf: String::new(),
            value_buf: String::new(),
            prev: None,
        }
    }

    fn run(mut self, text: &str) -> Result<(), ParseError> {
        let mut length = 0;
        for (index, c) in text.chars().enumerate() {
            length = index + 1;
            self.step(index, c)?;
        }
        self.finish(length)
    }

    /// Dispatches one input character against the top of the stack.
    ///
    /// Loops only when completing a literal: its terminating delimiter must
    /// be reprocessed by whichever state the completion uncovers.
    fn step(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        loop {
            let top = *self
                .stack
                .last()
                .expect("the Done sentinel is never popped");
            match top {
                State::Done => {
                    return if c.is_whitespace() {
                        Ok(())
                    } else {
                        Err(ParseError::UnexpectedCharacter {
                            found: c,
                            index,
                            expected: Expected::EndOfInput,
                        })
                    };
                }
                State::Value => return self.value_char(index, c),
                State::Object => return self.object_char(index, c),
                State::Array => return self.array_char(index, c),
                State::BareKey => {
                    if c == ':' {
                        self.stack.pop();
                        self.stack.push(State::Value);
                        self.emit_key();
                    } else if c.is_whitespace() {
                        self.stack.pop();
                        self.stack.push(State::Colon);
                        self.emit_key();
                    } else {
                        self.key_buf.push(c);
                    }
                    return Ok(());
                }
                State::QuotedKey(quote) => {
                    if c == quote && self.prev != Some('\\') {
                        self.stack.pop();
                        self.stack.push(State::Colon);
                        self.emit_key();
                    } else {
                        self.key_buf.push(c);
                        self.prev = Some(c);
                    }
                    return Ok(());
                }
                State::Colon => {
                    return match c {
                        _ if c.is_whitespace() => Ok(()),
                        ':' => {
                            self.stack.pop();
                            self.stack.push(State::Value);
                            Ok(())
                        }
                        _ => Err(ParseError::UnexpectedCharacter {
                            found: c,
                            index,
                            expected: Expected::OneOf(COLON),
                        }),
                    };
                }
                State::QuotedString(quote) => {
                    if c == quote && self.prev != Some('\\') {
                        self.stack.pop();
                        self.sink.primitive(&self.value_buf);
                        self.complete_value();
                    } else {
                        self.value_buf.push(c);
                        self.prev = Some(c);
                    }
                    return Ok(());
                }
                State::Literal(start) => {
                    if c.is_whitespace() || matches!(c, ',' | '}' | ']') {
                        self.finish_literal(start)?;
                        continue;
                    }
                    self.value_buf.push(c);
                    return Ok(());
                }
                State::Delimiter => return self.delimiter_char(index, c),
            }
        }
    }

    fn value_char(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        match c {
            _ if c.is_whitespace() => Ok(()),
            '{' => {
                self.stack.pop();
                self.stack.push(State::Object);
                self.sink.begin_object();
                Ok(())
            }
            '[' => {
                self.stack.pop();
                self.stack.push(State::Array);
                self.sink.begin_array();
                Ok(())
            }
            '"' => {
                self.stack.pop();
                self.begin_string('"');
                Ok(())
            }
            '\'' if self.options.allow_single_quotes => {
                self.stack.pop();
                self.begin_string('\'');
                Ok(())
            }
            ',' | ':' | '}' | ']' | '\'' => Err(ParseError::UnexpectedCharacter {
                found: c,
                index,
                expected: Expected::Value,
            }),
            _ => {
                self.stack.pop();
                self.begin_literal(index, c);
                Ok(())
            }
        }
    }

    fn object_char(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        match c {
            _ if c.is_whitespace() => Ok(()),
            '}' => {
                self.stack.pop();
                self.sink.end_object();
                self.complete_value();
                Ok(())
            }
            '"' => {
                self.begin_key('"');
                Ok(())
            }
            '\'' if self.options.allow_single_quotes => {
                self.begin_key('\'');
                Ok(())
            }
            ',' | ':' | '\'' => Err(ParseError::UnexpectedCharacter {
                found: c,
                index,
                expected: Expected::Key,
            }),
            _ if !self.options.allow_bare_keys => Err(ParseError::UnexpectedCharacter {
                found: c,
                index,
                expected: Expected::Key,
            }),
            _ => {
                // Any other character begins a bare key and the key then
                // accumulates everything up to whitespace or ':'.
                self.stack.push(State::BareKey);
                self.key_buf.clear();
                self.key_buf.push(c);
                Ok(())
            }
        }
    }

    fn array_char(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        match c {
            _ if c.is_whitespace() => Ok(()),
            ']' => {
                self.stack.pop();
                self.sink.end_array();
                self.complete_value();
                Ok(())
            }
            '{' => {
                self.stack.push(State::Object);
                self.sink.begin_object();
                Ok(())
            }
            '[' => {
                self.stack.push(State::Array);
                self.sink.begin_array();
                Ok(())
            }
            '"' => {
                self.begin_string('"');
                Ok(())
            }
            '\'' if self.options.allow_single_quotes => {
                self.begin_string('\'');
                Ok(())
            }
            ',' | ':' | '}' | '\'' => Err(ParseError::UnexpectedCharacter {
                found: c,
                index,
                expected: Expected::Value,
            }),
            _ => {
                self.begin_literal(index, c);
                Ok(())
            }
        }
    }

    fn delimiter_char(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        // Delimiter is only ever pushed on top of the container it belongs
        // to, so the entry beneath names the legal close character.
        let enclosing = self.stack[self.stack.len() - 2];
        let (close, expected) = match enclosing {
            State::Object => ('}', Expected::OneOf(COMMA_OR_BRACE)),
            _ => (']', Expected::OneOf(COMMA_OR_BRACKET)),
        };

        match c {
            _ if c.is_whitespace() => Ok(()),
            ',' => {
                // Pops one level, back to the enclosing container's
                // awaiting state.
                self.stack.pop();
                Ok(())
            }
            _ if c == close => {
                self.stack.pop();
                self.stack.pop();
                if close == '}' {
                    self.sink.end_object();
                } else {
                    self.sink.end_array();
                }
                self.complete_value();
                Ok(())
            }
            _ => Err(ParseError::UnexpectedCharacter {
                found: c,
                index,
                expected,
            }),
        }
    }

    fn begin_key(&mut self, quote: char) {
        self.stack.push(State::QuotedKey(quote));
        self.key_buf.clear();
        self.prev = None;
    }

    fn begin_string(&mut self, quote: char) {
        self.stack.push(State::QuotedString(quote));
        self.value_buf.clear();
        self.prev = None;
    }

    fn begin_literal(&mut self, index: usize, c: char) {
        self.stack.push(State::Literal(index));
        self.value_buf.clear();
        self.value_buf.push(c);
    }

    fn emit_key(&mut self) {
        self.sink.key(&self.key_buf);
    }

    /// Validates and emits the pending bare literal, uncovering the state
    /// that will handle the terminating character.
    fn finish_literal(&mut self, start: usize) -> Result<(), ParseError> {
        if !literal_matches_grammar(&self.value_buf) {
            return Err(ParseError::InvalidLiteral {
                literal: mem::take(&mut self.value_buf),
                index: start,
            });
        }
        self.stack.pop();
        self.sink.primitive(&self.value_buf);
        self.complete_value();
        Ok(())
    }

    /// A value just finished; if it sits inside a container, that container
    /// now awaits a comma or its close character.
    fn complete_value(&mut self) {
        if let Some(State::Object | State::Array) = self.stack.last() {
            self.stack.push(State::Delimiter);
        }
    }

    fn finish(mut self, length: usize) -> Result<(), ParseError> {
        // A bare literal at the root is terminated by the end of input.
        if let Some(State::Literal(start)) = self.stack.last().copied() {
            self.finish_literal(start)?;
        }
        if self.stack.len() == 1 {
            Ok(())
        } else {
            Err(ParseError::UnexpectedEndOfInput { index: length })
        }
    }
}

/// The bare-value grammar: an unsigned integer, an unsigned integer with a
/// single fractional part, or one of the three keywords. No sign, no
/// exponent form.
pub(crate) fn literal_matches_grammar(text: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    if matches!(text, "null" | "true" | "false") {
        return true;
    }
    match text.split_once('.') {
        Some((int, frac)) => digits(int) && digits(frac),
        None => digits(text),
    }
}

//! Token buffer and read cursors.
//!
//! Scanning produces an immutable [`TokenBuffer`]. Consumers read it
//! through a [`Cursor`], which owns nothing but a read index, so any number
//! of cursors can walk the same buffer independently. [`Lexer`] bundles a
//! buffer with one index for callers that want a single owned object.
//!
//! Errors recorded during the scan surface here: retrieving an `Error`
//! token through `next_token` or `peek_token` fails with a [`LexError`].
//! Tokens before it remain retrievable.

use tracing::trace;

use crate::line_index::LineIndex;
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::LexError;

/// The complete, immutable token sequence for one source text.
///
/// Always ends in exactly one `Eof` token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    line_index: LineIndex,
    error_count: usize,
}

impl TokenBuffer {
    pub(crate) fn new(tokens: Vec<Token>, line_index: LineIndex, error_count: usize) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token buffer must end in EOF"
        );
        Self {
            tokens,
            line_index,
            error_count,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens, including the trailing EOF.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of `Error` tokens recorded during the scan.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Every lexical error in source order, without consuming a cursor.
    pub fn errors(&self) -> impl Iterator<Item = LexError> + '_ {
        self.tokens.iter().filter_map(LexError::from_token)
    }

    /// A fresh cursor positioned at the first token.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.tokens)
    }
}

/// Sequential reader over a [`TokenBuffer`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Set once the iterator has yielded EOF.
    finished: bool,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self::at(tokens, 0)
    }

    fn at(tokens: &'a [Token], pos: usize) -> Self {
        Self {
            tokens,
            pos,
            finished: false,
        }
    }

    /// Index of the token the next retrieval will return.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Return the current token and advance past it.
    ///
    /// Advancing happens even when the token is an error, so the caller can
    /// keep reading after reporting it. Once EOF is reached the index stays
    /// on it and every further call returns EOF again.
    pub fn next_token(&mut self) -> Result<&'a Token, LexError> {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        surface(token)
    }

    /// Return the current token without advancing.
    ///
    /// Fails exactly when `next_token` would fail on the same token.
    pub fn peek_token(&self) -> Result<&'a Token, LexError> {
        surface(self.current())
    }

    /// Kind of the current token, regardless of whether it is an error.
    pub fn peek_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    fn current(&self) -> &'a Token {
        // The buffer always ends in EOF and `pos` never moves past it.
        &self.tokens[self.pos]
    }
}

/// Yields every token up to and including EOF, then `None`.
impl<'a> Iterator for Cursor<'a> {
    type Item = Result<&'a Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.finished = self.is_at_end();
        Some(self.next_token())
    }
}

fn surface(token: &Token) -> Result<&Token, LexError> {
    match LexError::from_token(token) {
        Some(err) => {
            trace!(offset = token.span.start, error = %err.kind, "surfacing lexical error");
            Err(err)
        }
        None => Ok(token),
    }
}

/// A scanned source plus one read position.
///
/// The parser-facing shape: construct from source, then call
/// `next_token`/`peek_token` until EOF.
#[derive(Debug, Clone)]
pub struct Lexer {
    buffer: TokenBuffer,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            buffer: Scanner::tokenize(source),
            pos: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<&Token, LexError> {
        let mut cursor = Cursor::at(&self.buffer.tokens, self.pos);
        let result = cursor.next_token();
        self.pos = cursor.position();
        result
    }

    pub fn peek_token(&self) -> Result<&Token, LexError> {
        Cursor::at(&self.buffer.tokens, self.pos).peek_token()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> TokenBuffer {
        self.buffer
    }
}

//! PLC Lexer
//!
//! Tokenizes source text of the PLC imaging language into a sequence of
//! typed tokens with zero-based line/column locations.
//! Handles multi-character operators by longest match, integer/float/string
//! literals, `#` line comments, and reserved-word classification.
//!
//! Scanning never fails. Broken lexemes are kept as `Error` tokens and are
//! reported when a cursor retrieves them.
//!
//! # Example
//!
//! ```
//! use plc_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("x <- 1;");
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
//! assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::LArrow);
//! ```

pub mod cursor;
pub mod keywords;
pub mod line_index;
pub mod scanner;
pub mod token;

pub use cursor::{Cursor, Lexer, TokenBuffer};
pub use line_index::LineIndex;
pub use scanner::Scanner;
pub use token::{SourceLocation, Span, Token, TokenKind, TokenValue, TokenValueError};

/// Scan `source` into an immutable token buffer.
pub fn tokenize(source: &str) -> TokenBuffer {
    Scanner::tokenize(source)
}

/// What went wrong in a broken lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LexErrorKind {
    #[error("illegal character")]
    IllegalCharacter,
    #[error("malformed numeric literal: expected a digit after '.'")]
    MissingFractionDigits,
    #[error("malformed numeric literal: integer out of range")]
    IntegerOutOfRange,
    #[error("malformed numeric literal: float out of range")]
    FloatOutOfRange,
    #[error("malformed string literal: illegal character")]
    IllegalStringCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
}

impl LexErrorKind {
    pub fn is_malformed_number(self) -> bool {
        matches!(
            self,
            LexErrorKind::MissingFractionDigits
                | LexErrorKind::IntegerOutOfRange
                | LexErrorKind::FloatOutOfRange
        )
    }

    pub fn is_malformed_string(self) -> bool {
        matches!(
            self,
            LexErrorKind::IllegalStringCharacter | LexErrorKind::UnterminatedString
        )
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Lexer error at line {}, column {}: {kind} in `{text}`",
    .location.line,
    .location.column
)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// The offending lexeme.
    pub text: String,
    pub location: SourceLocation,
}

impl LexError {
    /// The error an `Error` token stands for, or `None` for any other token.
    pub fn from_token(token: &Token) -> Option<Self> {
        token.error_kind().map(|kind| Self {
            kind,
            text: token.text.clone(),
            location: token.source_location(),
        })
    }
}

use std::fmt;

use crate::LexErrorKind;

/// A region of source text, tracking line and column for error reporting.
///
/// `start` and `end` are byte offsets (`end` exclusive). `line` and `column`
/// are zero-based and locate `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Zero-based line and column of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token classification for PLC source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    // Literals
    IntLit,
    FloatLit,
    StringLit,
    BooleanLit,
    ColorConst,

    // Names
    Ident,
    Type,
    ColorOp,
    ImageOp,

    // Delimiters
    LParen,
    RParen,
    LSquare,
    RSquare,
    LAngle, // <<
    RAngle, // >>

    // Arithmetic
    Plus,
    Minus,
    Times,
    Div,
    Mod,

    // Logical
    And,
    Or,
    Bang,

    // Comparison
    Lt,
    Gt,
    Le,
    Ge,
    Equals,
    NotEquals,

    // Assignment and flow
    Assign,
    LArrow, // <-
    RArrow, // ->
    Return, // ^

    // Punctuation
    Semi,
    Comma,

    // Keywords
    KwIf,
    KwFi,
    KwElse,
    KwWrite,
    KwConsole,
    KwVoid,

    Eof,
    Error,
}

impl TokenKind {
    /// Fixed spelling of operator, punctuation and keyword kinds.
    ///
    /// Kinds whose text varies (literals, names, `Eof`, `Error`) return `None`.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LSquare => "[",
            TokenKind::RSquare => "]",
            TokenKind::LAngle => "<<",
            TokenKind::RAngle => ">>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Div => "/",
            TokenKind::Mod => "%",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Bang => "!",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Assign => "=",
            TokenKind::LArrow => "<-",
            TokenKind::RArrow => "->",
            TokenKind::Return => "^",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::KwIf => "if",
            TokenKind::KwFi => "fi",
            TokenKind::KwElse => "else",
            TokenKind::KwWrite => "write",
            TokenKind::KwConsole => "console",
            TokenKind::KwVoid => "void",
            TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::StringLit
            | TokenKind::BooleanLit
            | TokenKind::ColorConst
            | TokenKind::Ident
            | TokenKind::Type
            | TokenKind::ColorOp
            | TokenKind::ImageOp
            | TokenKind::Eof
            | TokenKind::Error => return None,
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwIf
                | TokenKind::KwFi
                | TokenKind::KwElse
                | TokenKind::KwWrite
                | TokenKind::KwConsole
                | TokenKind::KwVoid
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLit
                | TokenKind::FloatLit
                | TokenKind::StringLit
                | TokenKind::BooleanLit
                | TokenKind::ColorConst
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.fixed_text() {
            return write!(f, "'{text}'");
        }
        let name = match self {
            TokenKind::IntLit => "integer literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::StringLit => "string literal",
            TokenKind::BooleanLit => "boolean literal",
            TokenKind::ColorConst => "color constant",
            TokenKind::Ident => "identifier",
            TokenKind::Type => "type name",
            TokenKind::ColorOp => "color operator",
            TokenKind::ImageOp => "image operator",
            TokenKind::Eof => "end of input",
            _ => "invalid token",
        };
        f.write_str(name)
    }
}

/// The decoded value carried by a token.
///
/// Decoded once by the scanner, so accessors never re-parse lexeme text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenValue {
    None,
    Int(i32),
    Float(f32),
    Boolean(bool),
    /// String content without the delimiting quotes.
    String(String),
    Error(LexErrorKind),
}

/// Misuse of a typed value accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenValueError {
    #[error("{found} has no {expected} value")]
    WrongKind {
        expected: TokenKind,
        found: TokenKind,
    },
}

/// A token produced by the PLC scanner. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, value: TokenValue) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            value,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw lexeme. String literals keep their quotes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute byte offset of the first character.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn source_location(&self) -> SourceLocation {
        self.span.location()
    }

    /// The error condition an ERROR token stands for.
    pub fn error_kind(&self) -> Option<LexErrorKind> {
        match self.value {
            TokenValue::Error(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn int_value(&self) -> Result<i32, TokenValueError> {
        match self.value {
            TokenValue::Int(value) if self.kind == TokenKind::IntLit => Ok(value),
            _ => Err(self.wrong_kind(TokenKind::IntLit)),
        }
    }

    pub fn float_value(&self) -> Result<f32, TokenValueError> {
        match self.value {
            TokenValue::Float(value) if self.kind == TokenKind::FloatLit => Ok(value),
            _ => Err(self.wrong_kind(TokenKind::FloatLit)),
        }
    }

    pub fn boolean_value(&self) -> Result<bool, TokenValueError> {
        match self.value {
            TokenValue::Boolean(value) if self.kind == TokenKind::BooleanLit => Ok(value),
            _ => Err(self.wrong_kind(TokenKind::BooleanLit)),
        }
    }

    pub fn string_value(&self) -> Result<&str, TokenValueError> {
        match &self.value {
            TokenValue::String(value) if self.kind == TokenKind::StringLit => Ok(value),
            _ => Err(self.wrong_kind(TokenKind::StringLit)),
        }
    }

    fn wrong_kind(&self, expected: TokenKind) -> TokenValueError {
        TokenValueError::WrongKind {
            expected,
            found: self.kind,
        }
    }
}

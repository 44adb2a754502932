use tracing::{debug, trace};

use crate::cursor::TokenBuffer;
use crate::keywords;
use crate::line_index::LineIndex;
use crate::token::{Span, Token, TokenKind, TokenValue};
use crate::LexErrorKind;

/// PLC source scanner.
///
/// A single eager pass over the source that produces every token up front.
/// Each `scan_*` method is one state of the automaton: it runs until its
/// terminator, emits at most one token, and leaves the terminator
/// unconsumed for the start state.
///
/// - Byte-indexed navigation; the language is ASCII outside comments
/// - End of input is an explicit bounds check, never an in-band character
/// - Broken lexemes become `Error` tokens and scanning continues
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line_index: LineIndex,
    tokens: Vec<Token>,
    errors: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line_index: LineIndex::new(source),
            tokens: Vec::new(),
            errors: 0,
        }
    }

    /// Tokenize the entire source.
    ///
    /// Never fails: lexical errors are recorded as `Error` tokens and only
    /// surface when a cursor retrieves them.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn tokenize(source: &str) -> TokenBuffer {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens();
        debug!(
            tokens = scanner.tokens.len(),
            errors = scanner.errors,
            "scanned source"
        );
        TokenBuffer::new(scanner.tokens, scanner.line_index, scanner.errors)
    }

    /// Scan all tokens, then append the single EOF token.
    fn scan_tokens(&mut self) {
        while let Some(byte) = self.current() {
            self.scan_token(byte);
        }
        self.emit(TokenKind::Eof, self.pos, TokenValue::None);
    }

    /// Start state: dispatch on the current byte.
    fn scan_token(&mut self, byte: u8) {
        match byte {
            b' ' | b'\t' | b'\r' | b'\n' => self.advance(),

            // Unambiguous single characters
            b'(' => self.operator(TokenKind::LParen, 1),
            b')' => self.operator(TokenKind::RParen, 1),
            b'[' => self.operator(TokenKind::LSquare, 1),
            b']' => self.operator(TokenKind::RSquare, 1),
            b'+' => self.operator(TokenKind::Plus, 1),
            b'*' => self.operator(TokenKind::Times, 1),
            b'/' => self.operator(TokenKind::Div, 1),
            b'%' => self.operator(TokenKind::Mod, 1),
            b'&' => self.operator(TokenKind::And, 1),
            b'|' => self.operator(TokenKind::Or, 1),
            b';' => self.operator(TokenKind::Semi, 1),
            b',' => self.operator(TokenKind::Comma, 1),
            b'^' => self.operator(TokenKind::Return, 1),

            // One byte of lookahead, longest match wins
            b'<' => match self.peek_next() {
                Some(b'<') => self.operator(TokenKind::LAngle, 2),
                Some(b'=') => self.operator(TokenKind::Le, 2),
                Some(b'-') => self.operator(TokenKind::LArrow, 2),
                _ => self.operator(TokenKind::Lt, 1),
            },
            b'>' => match self.peek_next() {
                Some(b'>') => self.operator(TokenKind::RAngle, 2),
                Some(b'=') => self.operator(TokenKind::Ge, 2),
                _ => self.operator(TokenKind::Gt, 1),
            },
            b'-' => match self.peek_next() {
                Some(b'>') => self.operator(TokenKind::RArrow, 2),
                _ => self.operator(TokenKind::Minus, 1),
            },
            b'!' => match self.peek_next() {
                Some(b'=') => self.operator(TokenKind::NotEquals, 2),
                _ => self.operator(TokenKind::Bang, 1),
            },
            b'=' => match self.peek_next() {
                Some(b'=') => self.operator(TokenKind::Equals, 2),
                _ => self.operator(TokenKind::Assign, 1),
            },

            b'"' => self.scan_string(),
            b'#' => self.skip_comment(),
            b'0' => self.scan_zero(),
            b'1'..=b'9' => self.scan_number(),
            c if is_ident_start(c) => self.scan_identifier(),

            _ => self.illegal_character(),
        }
    }

    // --- Scanners ---

    /// `0` is a complete integer unless a fraction follows it.
    fn scan_zero(&mut self) {
        let start = self.pos;
        self.advance();
        if self.current() == Some(b'.') {
            self.scan_fraction(start);
        } else {
            self.finish_int(start);
        }
    }

    /// Scan a decimal integer starting with `1`-`9`, or a float if a `.`
    /// follows the digits.
    fn scan_number(&mut self) {
        let start = self.pos;
        self.skip_digits();
        if self.current() == Some(b'.') {
            self.scan_fraction(start);
        } else {
            self.finish_int(start);
        }
    }

    fn finish_int(&mut self, start: usize) {
        match self.source[start..self.pos].parse::<i32>() {
            Ok(value) => self.emit(TokenKind::IntLit, start, TokenValue::Int(value)),
            Err(_) => self.error(start, LexErrorKind::IntegerOutOfRange),
        }
    }

    /// Scan the fractional part. The cursor sits on the `.`.
    ///
    /// At least one digit must follow the dot; otherwise the digits and dot
    /// become an `Error` token and the byte after the dot is left for the
    /// start state.
    fn scan_fraction(&mut self, start: usize) {
        self.advance();
        if !self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.error(start, LexErrorKind::MissingFractionDigits);
            return;
        }
        self.skip_digits();

        match self.source[start..self.pos].parse::<f32>() {
            Ok(value) if value.is_finite() => {
                self.emit(TokenKind::FloatLit, start, TokenValue::Float(value))
            }
            _ => self.error(start, LexErrorKind::FloatOutOfRange),
        }
    }

    /// Scan an identifier, then classify it against the reserved words.
    fn scan_identifier(&mut self) {
        let start = self.pos;
        while self.current().is_some_and(is_ident_part) {
            self.advance();
        }

        let text = &self.source[start..self.pos];
        match keywords::lookup(text) {
            Some(TokenKind::BooleanLit) => {
                let value = TokenValue::Boolean(text == "true");
                self.emit(TokenKind::BooleanLit, start, value);
            }
            Some(kind) => self.emit(kind, start, TokenValue::None),
            None => self.emit(TokenKind::Ident, start, TokenValue::None),
        }
    }

    /// Scan a string literal. The lexeme keeps both quotes; the value does not.
    ///
    /// A byte outside the accepted set ends the literal as an error covering
    /// everything before it, and scanning resumes at that byte.
    fn scan_string(&mut self) {
        let start = self.pos;
        self.advance(); // opening quote

        loop {
            match self.current() {
                None => {
                    self.error(start, LexErrorKind::UnterminatedString);
                    return;
                }
                Some(b'"') => {
                    self.advance();
                    let content = self.source[start + 1..self.pos - 1].to_string();
                    self.emit(TokenKind::StringLit, start, TokenValue::String(content));
                    return;
                }
                Some(b) if is_string_char(b) => self.advance(),
                Some(_) => {
                    self.error(start, LexErrorKind::IllegalStringCharacter);
                    return;
                }
            }
        }
    }

    /// Skip a `#` comment up to, but not including, the next newline.
    fn skip_comment(&mut self) {
        while self.current().is_some_and(|b| b != b'\n') {
            self.advance();
        }
    }

    /// Emit a one-character error and step past the whole character.
    fn illegal_character(&mut self) {
        let start = self.pos;
        let width = self.source[start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
        self.error(start, LexErrorKind::IllegalCharacter);
    }

    // --- Helpers ---

    fn operator(&mut self, kind: TokenKind, width: usize) {
        let start = self.pos;
        self.pos += width;
        self.emit(kind, start, TokenValue::None);
    }

    /// Push a token covering `start..pos`.
    fn emit(&mut self, kind: TokenKind, start: usize, value: TokenValue) {
        let location = self.line_index.location(start);
        let span = Span::new(start, self.pos, location.line, location.column);
        let text = &self.source[start..self.pos];
        self.tokens.push(Token::new(kind, text, span, value));
    }

    fn error(&mut self, start: usize, kind: LexErrorKind) {
        self.errors += 1;
        trace!(
            offset = start,
            text = &self.source[start..self.pos],
            error = %kind,
            "recorded lexical error"
        );
        self.emit(TokenKind::Error, start, TokenValue::Error(kind));
    }

    fn skip_digits(&mut self) {
        while self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Bytes allowed between the quotes of a string literal.
fn is_string_char(b: u8) -> bool {
    is_ident_part(b) || b == b' '
}


#[cfg(test)]
mod proptest_invariants {
    use super::*;
    use proptest::prelude::*;

    /// Lexemes that each scan to exactly one token when separated by spaces.
    const LEXEMES: &[&str] = &[
        "abc", "x1", "$_", "0", "42", "0.25", "7.5", "\"hi there\"", "\"\"", "<<", ">>", "<=",
        ">=", "<-", "->", "<", ">", "-", "!", "!=", "==", "=", "(", ")", "[", "]", "+", "*", "/",
        "%", "&", "|", ";", ",", "^", "if", "fi", "int", "true", "RED", "getRed", "getWidth",
    ];

    fn naive_location(source: &str, offset: usize) -> (usize, usize) {
        let before = &source[..offset];
        let line = before.matches('\n').count();
        let column = match before.rfind('\n') {
            Some(nl) => offset - (nl + 1),
            None => offset,
        };
        (line, column)
    }

    proptest! {
        #[test]
        fn whitespace_only_yields_eof(source in "[ \t\r\n]{0,40}") {
            let buffer = Scanner::tokenize(&source);
            prop_assert_eq!(buffer.len(), 1);
            prop_assert_eq!(buffer.tokens()[0].kind, TokenKind::Eof);
        }

        #[test]
        fn rescan_is_deterministic(source in "[ -~\n\t]{0,80}") {
            prop_assert_eq!(Scanner::tokenize(&source), Scanner::tokenize(&source));
        }

        #[test]
        fn tokens_are_ordered_and_end_in_one_eof(source in "[ -~\n\té]{0,80}") {
            let buffer = Scanner::tokenize(&source);
            let toks = buffer.tokens();
            let eofs = toks.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(toks.last().map(|t| t.kind), Some(TokenKind::Eof));
            for pair in toks.windows(2) {
                prop_assert!(pair[0].span.start < pair[1].span.start || pair[1].kind == TokenKind::Eof);
                prop_assert!(pair[0].span.end <= pair[1].span.start);
            }
        }

        #[test]
        fn text_and_location_match_source(source in "[ -~\n\té]{0,80}") {
            let buffer = Scanner::tokenize(&source);
            for tok in buffer.tokens() {
                prop_assert_eq!(&source[tok.span.start..tok.span.end], tok.text.as_str());
                prop_assert_eq!(
                    (tok.span.line, tok.span.column),
                    naive_location(&source, tok.span.start)
                );
            }
        }

        #[test]
        fn separated_lexemes_round_trip(
            picks in proptest::collection::vec(proptest::sample::select(LEXEMES), 0..24)
        ) {
            let source = picks.join(" ");
            let buffer = Scanner::tokenize(&source);
            let texts: Vec<&str> = buffer
                .tokens()
                .iter()
                .filter(|t| t.kind != TokenKind::Eof && t.kind != TokenKind::Error)
                .map(|t| t.text.as_str())
                .collect();
            prop_assert_eq!(buffer.error_count(), 0);
            prop_assert_eq!(texts, picks);
        }
    }
}

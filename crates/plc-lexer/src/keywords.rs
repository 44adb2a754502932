//! Reserved words of the PLC language.
//!
//! Consulted once an identifier-shaped lexeme has been fully scanned.
//! Everything here is fixed at compile time; a miss means the lexeme is a
//! plain identifier.

use crate::token::TokenKind;

/// Named color constants, in the order the runtime palette defines them.
pub const COLOR_CONSTANTS: &[&str] = &[
    "BLACK",
    "BLUE",
    "CYAN",
    "DARK_GRAY",
    "GRAY",
    "GREEN",
    "LIGHT_GRAY",
    "MAGENTA",
    "ORANGE",
    "PINK",
    "RED",
    "WHITE",
    "YELLOW",
];

/// Primitive type names.
pub const TYPE_NAMES: &[&str] = &["int", "float", "string", "boolean", "color", "image"];

/// Look up a reserved word.
///
/// Returns `None` for anything that should be scanned as an identifier.
/// Matching is exact and case-sensitive: `BLUE1` and `If` are identifiers.
pub fn lookup(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "if" => TokenKind::KwIf,
        "fi" => TokenKind::KwFi,
        "else" => TokenKind::KwElse,
        "write" => TokenKind::KwWrite,
        "console" => TokenKind::KwConsole,
        "void" => TokenKind::KwVoid,

        "int" | "float" | "string" | "boolean" | "color" | "image" => TokenKind::Type,

        "true" | "false" => TokenKind::BooleanLit,

        "BLACK" | "BLUE" | "CYAN" | "DARK_GRAY" | "GRAY" | "GREEN" | "LIGHT_GRAY" | "MAGENTA"
        | "ORANGE" | "PINK" | "RED" | "WHITE" | "YELLOW" => TokenKind::ColorConst,

        "getRed" | "getGreen" | "getBlue" => TokenKind::ColorOp,

        "getWidth" | "getHeight" => TokenKind::ImageOp,

        _ => return None,
    };
    Some(kind)
}

/// Check whether `text` is reserved in any category.
pub fn is_reserved(text: &str) -> bool {
    lookup(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_control_keywords() {
        assert_eq!(lookup("if"), Some(TokenKind::KwIf));
        assert_eq!(lookup("fi"), Some(TokenKind::KwFi));
        assert_eq!(lookup("else"), Some(TokenKind::KwElse));
        assert_eq!(lookup("write"), Some(TokenKind::KwWrite));
        assert_eq!(lookup("console"), Some(TokenKind::KwConsole));
        assert_eq!(lookup("void"), Some(TokenKind::KwVoid));
    }

    #[test]
    fn test_every_type_name() {
        for name in TYPE_NAMES {
            assert_eq!(lookup(name), Some(TokenKind::Type), "{name}");
        }
    }

    #[test]
    fn test_every_color_constant() {
        for name in COLOR_CONSTANTS {
            assert_eq!(lookup(name), Some(TokenKind::ColorConst), "{name}");
        }
    }

    #[test]
    fn test_booleans() {
        assert_eq!(lookup("true"), Some(TokenKind::BooleanLit));
        assert_eq!(lookup("false"), Some(TokenKind::BooleanLit));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(lookup("getRed"), Some(TokenKind::ColorOp));
        assert_eq!(lookup("getGreen"), Some(TokenKind::ColorOp));
        assert_eq!(lookup("getBlue"), Some(TokenKind::ColorOp));
        assert_eq!(lookup("getWidth"), Some(TokenKind::ImageOp));
        assert_eq!(lookup("getHeight"), Some(TokenKind::ImageOp));
    }

    #[test]
    fn test_near_misses_are_identifiers() {
        for text in ["BLUE1", "If", "True", "getred", "ints", "_if", "$void", ""] {
            assert_eq!(lookup(text), None, "{text}");
            assert!(!is_reserved(text));
        }
    }
}

//! A lexical token from an SXL source file

use crate::position::Position;
use std::fmt::{Debug, Display, Formatter};

/// A lexical token from a source file.
///
/// Tokens are immutable once created: the lexer builds each one exactly once
/// and everything downstream reads them through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    image: String,
    position: Position,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, image: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            image: image.into(),
            position,
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The exact source substring this token was matched from
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Position of the end of the match
    pub fn position(&self) -> Position {
        self.position
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "< {} : {} >", self.kind, self.image)
    }
}

/// The kind for a token.
///
/// This is the complete set the lexer exposes to the parser; the `Eof` kind
/// appears exactly once, as the final token of every sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,

    // literals
    IntegerLiteral,
    RealLiteral,
    CharLiteral,
    StringLiteral,
    BooleanLiteral,
    UnitLiteral,

    // operators
    AddOp,
    MultOp,
    RelOp,
    EqualsOp,
    /// `<-`
    AssignOp,

    // syntax symbols
    Comma,
    Colon,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBlock,
    CloseBlock,

    /// End of input; only ever the last token of a sequence
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer-literal",
            TokenKind::RealLiteral => "real-literal",
            TokenKind::CharLiteral => "char-literal",
            TokenKind::StringLiteral => "string-literal",
            TokenKind::BooleanLiteral => "boolean-literal",
            TokenKind::UnitLiteral => "unit-literal",
            TokenKind::AddOp => "additive-op",
            TokenKind::MultOp => "multiplicative-op",
            TokenKind::RelOp => "relational-op",
            TokenKind::EqualsOp => "equals-op",
            TokenKind::AssignOp => "assign-op",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::OpenBlock => "open-block",
            TokenKind::CloseBlock => "close-block",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Keyword, "function", Position::new(1, 8));
        assert_eq!(token.to_string(), "< keyword : function >");
    }

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenKind::Identifier, "count", Position::new(2, 5));
        assert_eq!(token.kind(), &TokenKind::Identifier);
        assert_eq!(token.image(), "count");
        assert_eq!(token.position(), Position::new(2, 5));
    }
}

//! Errors produced while parsing a token sequence

use crate::lexer::LexingError;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use sxl_tokens::{Position, Token};
use thiserror::Error;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// An error produced during parsing, positioned when the offending token is
/// known
#[derive(Debug, Error)]
pub struct SyntaxError {
    #[source]
    kind: ErrorKind,
    position: Option<Position>,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, position: impl Into<Option<Position>>) -> Self {
        Self {
            kind,
            position: position.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)?;
        if let Some(position) = self.position {
            write!(f, ", at {position}")?;
        }
        Ok(())
    }
}

impl<E: Into<ErrorKind>> From<E> for SyntaxError {
    fn from(value: E) -> Self {
        Self {
            kind: value.into(),
            position: None,
        }
    }
}

/// The cause of a [SyntaxError]
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("expected {}, found {found}", expected.iter().join(" or "))]
    Expected { expected: Vec<String>, found: Token },
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error(transparent)]
    Lex(#[from] LexingError),
}

impl ErrorKind {
    /// Creates an [ErrorKind::Expected] from any collection of descriptions
    pub fn expected(
        expected: impl IntoIterator<Item = impl Into<String>>,
        found: Token,
    ) -> Self {
        Self::Expected {
            expected: expected.into_iter().map(Into::into).collect(),
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sxl_tokens::TokenKind;

    #[test]
    fn test_expected_lists_alternatives() {
        let found = Token::new(TokenKind::Semicolon, ";", Position::new(3, 7));
        let error = SyntaxError::new(
            ErrorKind::expected(["identifier", "literal"], found),
            Position::new(3, 7),
        );
        assert_eq!(
            error.to_string(),
            "syntax error: expected identifier or literal, found < semicolon : ; >, at 3:7"
        );
    }

    #[test]
    fn test_unpositioned_error_omits_position() {
        let error = SyntaxError::from(ErrorKind::UnexpectedEof);
        assert_eq!(error.to_string(), "syntax error: unexpected end of input");
    }
}

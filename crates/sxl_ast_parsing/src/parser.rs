//! Backtracking recursive-descent parser over a lexed token sequence.
//!
//! Every grammar rule is a function from parser state to a
//! [ParseResult]; ordered choice is expressed with [Parser::attempt], which
//! rewinds the cursor whenever the attempted rule fails. Backtracking is
//! unbounded, so a failed speculation never leaves the cursor moved.

use crate::parser::cursor::TokenCursor;
use sxl_ast::Program;
use sxl_tokens::{Token, TokenKind};
use tracing::trace;

pub use error::{ErrorKind, ParseResult, SyntaxError};

mod cursor;
mod error;
mod expr;
mod stmt;

/// Parses a token sequence into a [Program]
#[derive(Debug)]
pub struct Parser {
    cursor: TokenCursor,
}

impl Parser {
    /// Creates a parser over a token sequence ending in EOF
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    /// Parses the whole sequence into a program, consuming the parser
    pub fn parse_program(mut self) -> ParseResult<Program> {
        stmt::parse_program(&mut self)
    }

    /// The token at the cursor, without consuming it
    fn current(&self) -> &Token {
        self.cursor.current()
    }

    /// Consumes and returns the current token
    fn next_token(&mut self) -> Token {
        let token = self.cursor.advance().clone();
        trace!("consumed {token}");
        token
    }

    /// Runs a rule speculatively: on failure the cursor is rewound to where
    /// it was before the rule started.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let mark = self.cursor.position();
        match rule(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.cursor.rewind_to(mark);
                Err(e)
            }
        }
    }

    /// Consumes the current token if the predicate accepts it
    fn consume_if(&mut self, predicate: impl FnOnce(&Token) -> bool) -> Option<Token> {
        if predicate(self.current()) {
            Some(self.next_token())
        } else {
            None
        }
    }

    /// Consumes the current token if it has the given kind
    fn consume_if_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.consume_if(|token| token.kind() == &kind)
    }

    /// Consumes a token of the given kind, or fails without moving the
    /// cursor. `what` names the expectation in the error.
    fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        match self.consume_if_kind(kind) {
            Some(token) => Ok(token),
            None => {
                let found = self.current().clone();
                let position = found.position();
                Err(SyntaxError::new(
                    ErrorKind::expected([what], found),
                    position,
                ))
            }
        }
    }

    /// Consumes a keyword token with the given image, or fails without
    /// moving the cursor
    fn expect_keyword(&mut self, word: &str) -> ParseResult<Token> {
        let matched = self
            .consume_if(|token| token.kind() == &TokenKind::Keyword && token.image() == word);
        match matched {
            Some(token) => Ok(token),
            None => {
                let found = self.current().clone();
                let position = found.position();
                Err(SyntaxError::new(
                    ErrorKind::expected([format!("\"{word}\"")], found),
                    position,
                ))
            }
        }
    }
}

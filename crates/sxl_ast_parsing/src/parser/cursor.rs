//! Sequential, rewindable access to a lexed token sequence

use sxl_tokens::{Token, TokenKind};

/// A cursor over a token sequence.
///
/// The cursor never runs out: once the index reaches the final EOF token it
/// stays there, and every further [advance](TokenCursor::advance) returns the
/// EOF token again. [retreat](TokenCursor::retreat) at index zero is a no-op.
#[derive(Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    index: usize,
    eof: Token,
}

impl TokenCursor {
    /// Creates a cursor positioned at the first token.
    ///
    /// The sequence is expected to end with an EOF token; an empty sequence
    /// gets a synthetic one so the cursor always has a current token.
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = tokens
            .last()
            .filter(|token| token.kind() == &TokenKind::Eof)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", Default::default()));
        Self {
            tokens,
            index: 0,
            eof,
        }
    }

    /// The token at the cursor
    pub fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    /// Returns the current token and moves forward, saturating at EOF
    pub fn advance(&mut self) -> &Token {
        let index = self.index;
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// Moves back one token; no-op at the start of the sequence
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Opaque mark for [rewind_to](TokenCursor::rewind_to)
    pub fn position(&self) -> usize {
        self.index
    }

    /// Restores a previously captured mark
    pub fn rewind_to(&mut self, mark: usize) {
        self.index = mark;
    }
}

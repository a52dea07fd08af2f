//! The reserved-word table

use crate::token::TokenKind;
use std::collections::HashSet;

/// Keywords and reserved words of the language.
pub const RESERVED_WORDS: [&str; 20] = [
    "function", "if", "while", "halt", "in", "and", "or", "not", "read", "write", "set", "let",
    "int", "real", "char", "string", "bool", "unit", "true", "false",
];

/// The reserved-word lookup table.
///
/// Constructed once and captured by the lexer rather than consulted through
/// any global. Three reserved words are operators or literals lexically:
/// `true`/`false` classify as boolean literals, `and` as a multiplicative
/// operator, and `or` as an additive operator.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    words: HashSet<&'static str>,
}

impl KeywordTable {
    /// Builds the table from [RESERVED_WORDS]
    pub fn new() -> Self {
        Self {
            words: RESERVED_WORDS.iter().copied().collect(),
        }
    }

    /// Whether the given word is reserved
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// The token kind for an identifier-shaped image
    pub fn classify(&self, image: &str) -> TokenKind {
        match image {
            "true" | "false" => TokenKind::BooleanLiteral,
            "and" => TokenKind::MultOp,
            "or" => TokenKind::AddOp,
            word if self.contains(word) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_are_keywords() {
        let table = KeywordTable::new();
        for word in ["function", "if", "while", "halt", "in", "not", "set", "let"] {
            assert_eq!(table.classify(word), TokenKind::Keyword, "{word}");
        }
    }

    #[test]
    fn test_operator_and_literal_keywords() {
        let table = KeywordTable::new();
        assert_eq!(table.classify("true"), TokenKind::BooleanLiteral);
        assert_eq!(table.classify("false"), TokenKind::BooleanLiteral);
        assert_eq!(table.classify("and"), TokenKind::MultOp);
        assert_eq!(table.classify("or"), TokenKind::AddOp);
    }

    #[test]
    fn test_non_keywords_are_identifiers() {
        let table = KeywordTable::new();
        assert_eq!(table.classify("x"), TokenKind::Identifier);
        assert_eq!(table.classify("functions"), TokenKind::Identifier);
        // `else` is deliberately not reserved
        assert_eq!(table.classify("else"), TokenKind::Identifier);
    }
}

//! Converts a source file into a token sequence.
//!
//! Tokenization is eager: [Lexer::tokenize] scans the whole input before the
//! parser sees anything, appending the single EOF token on success. A lex
//! error aborts the run; no partial sequence is ever handed on.

use crate::lexer::scanner::Scanner;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};
use sxl_tokens::{KeywordTable, Position, Token, TokenKind};
use thiserror::Error;
use tracing::trace;

mod scanner;

type LexResult<T> = Result<T, LexingError>;

/// Responsible for converting a [Read] obj into a token sequence
#[derive(Debug)]
pub struct Lexer<'p, R> {
    path: &'p Path,
    scanner: Scanner<R>,
    keywords: KeywordTable,
    buffer: String,
}

impl<'p> Lexer<'p, File> {
    /// Creates a new lexer from a path, holding the file handle until
    /// tokenization finishes
    pub fn read_path(path: &'p Path) -> io::Result<Self> {
        let reader = File::open(path)?;
        Ok(Self::new(path, reader))
    }
}

impl<'p, R: Read> Lexer<'p, R> {
    /// Creates a new lexer over an arbitrary reader
    pub fn new(path: &'p Path, reader: R) -> Self {
        Self {
            path,
            scanner: Scanner::new(reader),
            keywords: KeywordTable::new(),
            buffer: String::new(),
        }
    }

    /// Runs the scanner to completion, returning every token in order with
    /// the EOF token appended last.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexingError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            trace!("lexed {token}");
            tokens.push(token);
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.scanner.position()));
        Ok(tokens)
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            let Some((ch, position)) = self.scanner.next()? else {
                return Ok(None);
            };
            let token = match ch {
                ' ' | '\t' | '\n' => continue,
                '/' => match self.scanner.peek()? {
                    Some('/') => {
                        self.skip_line_comment()?;
                        continue;
                    }
                    Some('*') => {
                        self.skip_block_comment(position)?;
                        continue;
                    }
                    _ => Token::new(TokenKind::MultOp, "/", position),
                },
                '"' => self.scan_string(position)?,
                '\'' => self.scan_char(position)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(c, position)?,
                c if c.is_ascii_digit() => self.scan_number(c, position)?,
                '<' => match self.scanner.peek()? {
                    Some('-') => {
                        let end = self.consume_second(position)?;
                        Token::new(TokenKind::AssignOp, "<-", end)
                    }
                    Some('=') => {
                        let end = self.consume_second(position)?;
                        Token::new(TokenKind::RelOp, "<=", end)
                    }
                    _ => Token::new(TokenKind::RelOp, "<", position),
                },
                '>' => match self.scanner.peek()? {
                    Some('=') => {
                        let end = self.consume_second(position)?;
                        Token::new(TokenKind::RelOp, ">=", end)
                    }
                    _ => Token::new(TokenKind::RelOp, ">", position),
                },
                '=' => match self.scanner.peek()? {
                    Some('=') => {
                        let end = self.consume_second(position)?;
                        Token::new(TokenKind::RelOp, "==", end)
                    }
                    _ => Token::new(TokenKind::EqualsOp, "=", position),
                },
                '!' => match self.scanner.peek()? {
                    Some('=') => {
                        let end = self.consume_second(position)?;
                        Token::new(TokenKind::RelOp, "!=", end)
                    }
                    _ => {
                        return Err(LexingError::UnrecognizedInput {
                            ch,
                            path: self.path.to_path_buf(),
                            position,
                        })
                    }
                },
                '#' => Token::new(TokenKind::UnitLiteral, "#", position),
                '+' | '-' => Token::new(TokenKind::AddOp, ch.to_string(), position),
                '*' => Token::new(TokenKind::MultOp, "*", position),
                ':' => Token::new(TokenKind::Colon, ":", position),
                ';' => Token::new(TokenKind::Semicolon, ";", position),
                ',' => Token::new(TokenKind::Comma, ",", position),
                '(' => Token::new(TokenKind::OpenParen, "(", position),
                ')' => Token::new(TokenKind::CloseParen, ")", position),
                '{' => Token::new(TokenKind::OpenBlock, "{", position),
                '}' => Token::new(TokenKind::CloseBlock, "}", position),
                _ => {
                    return Err(LexingError::UnrecognizedInput {
                        ch,
                        path: self.path.to_path_buf(),
                        position,
                    })
                }
            };
            return Ok(Some(token));
        }
    }

    /// Reads the peeked second character of a two-character operator
    fn consume_second(&mut self, fallback: Position) -> LexResult<Position> {
        Ok(self
            .scanner
            .next()?
            .map(|(_, position)| position)
            .unwrap_or(fallback))
    }

    fn flush_buffer(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    fn skip_line_comment(&mut self) -> LexResult<()> {
        loop {
            match self.scanner.next()? {
                Some(('\n', _)) | None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn skip_block_comment(&mut self, start: Position) -> LexResult<()> {
        loop {
            match self.scanner.next()? {
                Some(('*', _)) if self.scanner.peek()? == Some('/') => {
                    self.scanner.next()?;
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    return Err(LexingError::UnterminatedComment {
                        path: self.path.to_path_buf(),
                        position: start,
                    })
                }
            }
        }
    }

    fn scan_string(&mut self, start: Position) -> LexResult<Token> {
        self.buffer.push('"');
        let mut end = start;
        let mut ignore_next_quote = false;
        loop {
            let Some((ch, position)) = self.scanner.next()? else {
                return Err(LexingError::UnterminatedString {
                    path: self.path.to_path_buf(),
                    position: end,
                });
            };
            if !is_printable(ch) {
                return Err(LexingError::NonPrintable {
                    ch,
                    path: self.path.to_path_buf(),
                    position,
                });
            }
            self.buffer.push(ch);
            end = position;
            // a backslash makes the following quote ordinary content
            if ch == '\\' && self.scanner.peek()? == Some('"') {
                ignore_next_quote = true;
                continue;
            }
            if ch == '"' {
                if ignore_next_quote {
                    ignore_next_quote = false;
                } else {
                    break;
                }
            }
        }
        Ok(Token::new(TokenKind::StringLiteral, self.flush_buffer(), end))
    }

    fn scan_char(&mut self, start: Position) -> LexResult<Token> {
        self.buffer.push('\'');
        let (payload, payload_position) = self.require_char(start)?;
        if !is_printable(payload) {
            return Err(LexingError::NonPrintable {
                ch: payload,
                path: self.path.to_path_buf(),
                position: payload_position,
            });
        }
        self.buffer.push(payload);
        let mut end = payload_position;
        if payload == '\\' {
            let (escaped, escaped_position) = self.require_char(end)?;
            self.buffer.push(escaped);
            end = escaped_position;
        }
        let (close, close_position) = self.require_char(end)?;
        if close != '\'' {
            return Err(LexingError::MalformedCharLiteral {
                ch: close,
                path: self.path.to_path_buf(),
                position: close_position,
            });
        }
        self.buffer.push(close);
        Ok(Token::new(
            TokenKind::CharLiteral,
            self.flush_buffer(),
            close_position,
        ))
    }

    fn require_char(&mut self, at: Position) -> LexResult<(char, Position)> {
        self.scanner.next()?.ok_or_else(|| LexingError::UnexpectedEof {
            path: self.path.to_path_buf(),
            position: at,
        })
    }

    fn scan_word(&mut self, first: char, first_position: Position) -> LexResult<Token> {
        self.buffer.push(first);
        let mut end = first_position;
        loop {
            match self.scanner.next()? {
                Some((ch, position)) if is_identifier_char(ch) => {
                    self.buffer.push(ch);
                    end = position;
                }
                // the one character read past the end goes back for re-scanning
                Some((ch, position)) => {
                    self.scanner.push_back(ch, position);
                    break;
                }
                None => break,
            }
        }
        let image = self.flush_buffer();
        let kind = self.keywords.classify(&image);
        Ok(Token::new(kind, image, end))
    }

    fn scan_number(&mut self, first: char, first_position: Position) -> LexResult<Token> {
        self.buffer.push(first);
        let mut end = first_position;
        let mut kind = TokenKind::IntegerLiteral;
        let mut over_read = self.scan_digits(&mut end)?;

        if let Some(('.', dot_position)) = over_read {
            if matches!(self.scanner.peek()?, Some(c) if c.is_ascii_digit()) {
                kind = TokenKind::RealLiteral;
                self.buffer.push('.');
                end = dot_position;
                over_read = self.scan_digits(&mut end)?;
                if let Some((e, e_position)) = over_read {
                    if e == 'e' || e == 'E' {
                        over_read = self.scan_exponent(e, e_position, &mut end)?;
                    }
                }
            } else {
                // lone dot is not part of the number
                self.scanner.push_back('.', dot_position);
                over_read = None;
            }
        }
        if let Some((ch, position)) = over_read {
            self.scanner.push_back(ch, position);
        }
        Ok(Token::new(kind, self.flush_buffer(), end))
    }

    /// Accumulates digits into the buffer, handing back the first non-digit
    /// character read past the end, if any.
    fn scan_digits(&mut self, end: &mut Position) -> LexResult<Option<(char, Position)>> {
        loop {
            match self.scanner.next()? {
                Some((ch, position)) if ch.is_ascii_digit() => {
                    self.buffer.push(ch);
                    *end = position;
                }
                Some(other) => return Ok(Some(other)),
                None => return Ok(None),
            }
        }
    }

    /// Attempts to extend a real literal with an `e`/`E` exponent. The `e`
    /// has already been consumed; if no exponent follows, every over-read
    /// character is pushed back in input order.
    fn scan_exponent(
        &mut self,
        e: char,
        e_position: Position,
        end: &mut Position,
    ) -> LexResult<Option<(char, Position)>> {
        match self.scanner.peek()? {
            Some(c) if c.is_ascii_digit() => {
                self.buffer.push(e);
                *end = e_position;
                self.scan_digits(end)
            }
            Some('+') | Some('-') => {
                let Some((sign, sign_position)) = self.scanner.next()? else {
                    return Ok(Some((e, e_position)));
                };
                match self.scanner.peek()? {
                    Some(c) if c.is_ascii_digit() => {
                        self.buffer.push(e);
                        self.buffer.push(sign);
                        *end = sign_position;
                        self.scan_digits(end)
                    }
                    _ => {
                        self.scanner.push_back(e, e_position);
                        self.scanner.push_back(sign, sign_position);
                        Ok(None)
                    }
                }
            }
            _ => Ok(Some((e, e_position))),
        }
    }
}

impl<'p, R: Read> Iterator for Lexer<'p, R> {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(option) => option.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_printable(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

#[derive(Debug, Error)]
pub enum LexingError {
    #[error("unrecognized input {ch:?}, at {}:{position}", path.display())]
    UnrecognizedInput {
        ch: char,
        path: PathBuf,
        position: Position,
    },
    #[error("unterminated string literal, at {}:{position}", path.display())]
    UnterminatedString { path: PathBuf, position: Position },
    #[error("expected a printable character, found {ch:?}, at {}:{position}", path.display())]
    NonPrintable {
        ch: char,
        path: PathBuf,
        position: Position,
    },
    #[error("malformed character literal: expected \"'\", found {ch:?}, at {}:{position}", path.display())]
    MalformedCharLiteral {
        ch: char,
        path: PathBuf,
        position: Position,
    },
    #[error("unterminated block comment, at {}:{position}", path.display())]
    UnterminatedComment { path: PathBuf, position: Position },
    #[error("unexpected end of input, at {}:{position}", path.display())]
    UnexpectedEof { path: PathBuf, position: Position },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::new(Path::new("<test>"), src.as_bytes())
            .tokenize()
            .expect("tokenization should succeed")
    }

    fn lex_err(src: &str) -> LexingError {
        Lexer::new(Path::new("<test>"), src.as_bytes())
            .tokenize()
            .expect_err("tokenization should fail")
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| *t.kind()).collect()
    }

    fn images(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.image()).collect()
    }

    #[test]
    fn test_empty_input_yields_only_eof() {
        let tokens = lex("");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(tokens[0].position(), Position::new(1, 0));
    }

    #[test]
    fn test_variable_declaration_tokens() {
        let tokens = lex("let x : int = 5 ;");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Keyword,
                TokenKind::EqualsOp,
                TokenKind::IntegerLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(images(&tokens), vec!["let", "x", ":", "int", "=", "5", ";", ""]);
    }

    #[test]
    fn test_token_positions() {
        let tokens = lex("let x");
        assert_eq!(tokens[0].position(), Position::new(1, 3));
        assert_eq!(tokens[1].position(), Position::new(1, 5));
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let src = "set y <- y + 1 ; // trailing\nwhile ( y < 10 ) { read y ; }";
        assert_eq!(lex(src), lex(src));
    }

    #[test]
    fn test_assignment_operator_after_identifier() {
        let tokens = lex("x<-1");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::AssignOp,
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_relational_operators() {
        let tokens = lex("a < b <= c > d >= e == f != g = h");
        let operators: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t.kind(), TokenKind::RelOp | TokenKind::EqualsOp))
            .map(|t| (t.image().to_string(), *t.kind()))
            .collect();
        assert_eq!(
            operators,
            vec![
                ("<".to_string(), TokenKind::RelOp),
                ("<=".to_string(), TokenKind::RelOp),
                (">".to_string(), TokenKind::RelOp),
                (">=".to_string(), TokenKind::RelOp),
                ("==".to_string(), TokenKind::RelOp),
                ("!=".to_string(), TokenKind::RelOp),
                ("=".to_string(), TokenKind::EqualsOp),
            ]
        );
    }

    #[test]
    fn test_operator_keywords() {
        let tokens = lex("a and b or not c");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::MultOp,
                TokenKind::Identifier,
                TokenKind::AddOp,
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("42 3.14 2.5e10 1.5e-3 true false # 'a' \"hi\"");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::IntegerLiteral,
                TokenKind::RealLiteral,
                TokenKind::RealLiteral,
                TokenKind::RealLiteral,
                TokenKind::BooleanLiteral,
                TokenKind::BooleanLiteral,
                TokenKind::UnitLiteral,
                TokenKind::CharLiteral,
                TokenKind::StringLiteral,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[2].image(), "2.5e10");
        assert_eq!(tokens[3].image(), "1.5e-3");
        assert_eq!(tokens[7].image(), "'a'");
        assert_eq!(tokens[8].image(), "\"hi\"");
    }

    #[test]
    fn test_literal_round_trip() {
        for src in ["42", "3.14", "2.5e10", "'a'", "'\\''", "\"hi \\\" there\"", "#", "true"] {
            let tokens = lex(src);
            assert_eq!(tokens.len(), 2, "{src:?} should lex to one token plus EOF");
            let relexed = lex(tokens[0].image());
            assert_eq!(relexed[0].kind(), tokens[0].kind(), "{src:?}");
            assert_eq!(relexed[0].image(), tokens[0].image(), "{src:?}");
        }
    }

    #[test]
    fn test_integer_followed_by_dot() {
        // the dot is pushed back, and re-scanned it is not a recognized token
        let mut lexer = Lexer::new(Path::new("<test>"), "5.x".as_bytes());
        let first = lexer.next().expect("should produce a token").expect("should lex");
        assert_eq!(first.kind(), &TokenKind::IntegerLiteral);
        assert_eq!(first.image(), "5");
        assert!(matches!(
            lexer.next(),
            Some(Err(LexingError::UnrecognizedInput { ch: '.', .. }))
        ));
    }

    #[test]
    fn test_abandoned_exponent_is_rescanned() {
        let tokens = lex("1.5e+x");
        assert_eq!(images(&tokens), vec!["1.5", "e", "+", "x", ""]);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::RealLiteral,
                TokenKind::Identifier,
                TokenKind::AddOp,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_discarded() {
        let tokens = lex("// comment\nhalt 0 ; /* block\ncomment */ read x ;");
        assert_eq!(
            images(&tokens),
            vec!["halt", "0", ";", "read", "x", ";", ""]
        );
    }

    #[test]
    fn test_slash_alone_is_an_operator() {
        let tokens = lex("a / b");
        assert_eq!(kinds(&tokens)[1], TokenKind::MultOp);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert!(matches!(
            lex_err("/* never closed"),
            LexingError::UnterminatedComment { .. }
        ));
    }

    #[test]
    fn test_string_escape() {
        let tokens = lex(r#""say \"hi\"""#);
        assert_eq!(tokens[0].image(), r#""say \"hi\"""#);
        assert_eq!(tokens[0].kind(), &TokenKind::StringLiteral);
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            lex_err("\"no end"),
            LexingError::UnterminatedString { .. }
        ));
    }

    #[test]
    fn test_two_character_char_literal_fails() {
        let err = lex_err("'ab'");
        match err {
            LexingError::MalformedCharLiteral { ch, position, .. } => {
                assert_eq!(ch, 'b');
                assert_eq!(position, Position::new(1, 3));
            }
            other => panic!("expected MalformedCharLiteral, got {other:?}"),
        }
    }

    #[test]
    fn test_escaped_char_literal() {
        let tokens = lex(r"'\''");
        assert_eq!(tokens[0].image(), r"'\''");
        assert_eq!(tokens[0].kind(), &TokenKind::CharLiteral);
    }

    #[test]
    fn test_unrecognized_input() {
        let err = lex_err("let @ = 1;");
        match err {
            LexingError::UnrecognizedInput { ch, position, .. } => {
                assert_eq!(ch, '@');
                assert_eq!(position, Position::new(1, 5));
            }
            other => panic!("expected UnrecognizedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_no_tokens_after_error() {
        // the failed run yields an error, not a partial sequence
        let result = Lexer::new(Path::new("<test>"), "x @".as_bytes()).tokenize();
        assert!(result.is_err());
    }
}

//! Character-level scanning state for the lexer

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use sxl_tokens::Position;

/// Reads a source one character at a time, tracking row/column and holding
/// a small FIFO queue of pushed-back, over-read characters.
///
/// Every delivered character carries the position *after* consuming it; a
/// pushed-back character remembers that position, so re-delivering it never
/// shifts any recorded location. The queue is drained completely before any
/// fresh input is read, and only ever holds the exact characters the lexer
/// over-read to find a token boundary.
#[derive(Debug)]
pub(super) struct Scanner<R> {
    reader: BufReader<R>,
    row: u32,
    col: u32,
    last: Position,
    pushback: VecDeque<(char, Position)>,
}

impl<R: Read> Scanner<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            row: 1,
            col: 0,
            last: Position::default(),
            pushback: VecDeque::new(),
        }
    }

    /// Consumes and returns the next character together with its position,
    /// or `None` at end of input.
    pub(super) fn next(&mut self) -> std::io::Result<Option<(char, Position)>> {
        if let Some((ch, position)) = self.pushback.pop_front() {
            self.last = position;
            return Ok(Some((ch, position)));
        }
        let byte = {
            let buf = self.reader.fill_buf()?;
            match buf.first() {
                Some(&byte) => byte,
                None => return Ok(None),
            }
        };
        self.reader.consume(1);
        let ch = byte as char;
        match ch {
            '\n' => {
                self.row += 1;
                self.col = 0;
            }
            '\t' => self.col += 4,
            _ => self.col += 1,
        }
        let position = Position::new(self.row, self.col);
        self.last = position;
        Ok(Some((ch, position)))
    }

    /// Peeks at the next character without consuming it
    pub(super) fn peek(&mut self) -> std::io::Result<Option<char>> {
        if let Some(&(ch, _)) = self.pushback.front() {
            return Ok(Some(ch));
        }
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().map(|&byte| byte as char))
    }

    /// Returns an over-read character, with its original position, for
    /// re-scanning. Multiple characters must be pushed in the order they
    /// were read.
    pub(super) fn push_back(&mut self, ch: char, position: Position) {
        self.pushback.push_back((ch, position));
    }

    /// Position of the most recently delivered character
    pub(super) fn position(&self) -> Position {
        self.last
    }
}

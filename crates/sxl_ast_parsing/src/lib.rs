//! The SXL front end: lexer and recursive-descent parser.
//!
//! The pipeline is strictly sequential: a source file is tokenized eagerly
//! and to completion, the resulting token sequence is handed to a cursor,
//! and the parser walks the cursor with unbounded speculative backtracking
//! until it has one [Program](sxl_ast::Program) node or one error.

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, LexingError};
pub use parser::{Parser, SyntaxError};

use std::io::Read;
use std::path::Path;
use sxl_ast::Program;

/// Parses the source file at `path` into a program.
///
/// The file handle is held only for the duration of tokenization and is
/// released on every exit path, including lex errors.
pub fn parse_file(path: &Path) -> Result<Program, SyntaxError> {
    let lexer = Lexer::read_path(path).map_err(LexingError::from)?;
    let tokens = lexer.tokenize()?;
    Parser::new(tokens).parse_program()
}

/// Parses SXL source from an arbitrary reader; `path` is used only for
/// diagnostics.
pub fn parse_source<R: Read>(path: &Path, reader: R) -> Result<Program, SyntaxError> {
    let tokens = Lexer::new(path, reader).tokenize()?;
    Parser::new(tokens).parse_program()
}

//! Lexical building blocks for the SXL front end: tokens, source positions,
//! and the reserved-word table.

pub mod keywords;
pub mod position;
pub mod token;

pub use keywords::KeywordTable;
pub use position::Position;
pub use token::{Token, TokenKind};

//! The SXL abstract syntax tree and its textual rendering.
//!
//! The tree is a closed set of node variants built bottom-up by the parser
//! and immutable afterwards. Every interior node owns its children; the
//! shape (child count and order) of each variant is fixed and is the
//! contract the renderer and any later phase rely on.

pub mod ast;
pub mod render;

pub use ast::*;
pub use render::render;

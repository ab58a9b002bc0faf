//! # Statement Recognizer
//!
//! Turns one trimmed input line into a typed [`ast::Statement`], or signals
//! "no match" so the caller can report an unsupported statement. Each
//! supported grammar is a fixed pattern tried in a fixed order; keywords are
//! case-insensitive and a trailing `;` is tolerated everywhere.
//!
//! This is deliberately not a general SQL parser: there is no tokenizer, no
//! expression grammar, and no nesting beyond the single WHERE comparison and
//! the single equi-join clause.

pub mod ast;
pub mod diagnostics;
pub mod parser;

pub use ast::*;
pub use diagnostics::SyntaxError;
pub use parser::parse;

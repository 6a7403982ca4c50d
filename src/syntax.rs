//! The grammar S → aSb | ε as a pest parser.

pub mod parser;

pub use parser::{grammar_accepts, parse_derivation};

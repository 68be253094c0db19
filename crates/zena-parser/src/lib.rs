//! Recursive-descent parser for the zena language: tokens to AST.
//!
//! The parser never panics on malformed input — a syntax error is recorded
//! into the returned [`DiagnosticBag`] and parsing resumes at the next
//! statement boundary, so one bad declaration never prevents the rest of
//! the module from being parsed (and, downstream, checked).

mod decl;
mod expr;
mod parser;
mod pattern;
mod stmt;
mod type_ann;

pub use parser::{Parser, parse_module};

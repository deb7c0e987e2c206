//! The Assembler module is in charge of taking a
//! Hack assembly file and producing 16-bit binary words.
//!
//! It does this by implementing a line-oriented tokenizer,
//! a one-token-lookahead command parser and a two-pass
//! driver that resolves labels before emitting code.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod passes;
pub mod symbols;

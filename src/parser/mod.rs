//! G-code Parser
//!
//! Line-at-a-time tokenization with borrowed tokens. Strips comments,
//! classifies the command word and exposes numeric parameters.

pub mod ast;
pub mod lexer;

pub use ast::{Command, CommandCode, Comment, Parameter, ParsedLine};
pub use lexer::{tokenize_line, Token, TokenKind};

/// Parse a single line of G-code into structured data
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    ast::tokens_to_parsed_line(lexer::tokenize_line(line))
}

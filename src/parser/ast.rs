//! Parsed representation of a G-code line
//!
//! Pure data borrowed from the source line. Interpretation of what a
//! command does lives with the consumers (see `crate::extrusion`).

use std::fmt;

use crate::parser::lexer::{Token, TokenKind};

/// A parsed line of G-code
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine<'a> {
    /// A command with parameters and optional comment
    Command(Command<'a>),
    /// A comment-only line
    Comment(Comment<'a>),
    /// An empty or whitespace-only line
    Empty,
}

/// A G-code command like "G1 X10 E.5"
#[derive(Debug, Clone, PartialEq)]
pub struct Command<'a> {
    /// Command word as written (e.g. "G1", "m083")
    pub name: &'a str,
    pub parameters: Vec<Parameter<'a>>,
    /// Optional trailing comment
    pub comment: Option<Comment<'a>>,
}

/// A command parameter like "E-0.8"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter<'a> {
    pub letter: char,
    /// Raw value text; see [`Parameter::number`]
    pub value: &'a str,
}

/// A comment (semicolon or parenthetical)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comment<'a> {
    /// Comment text without the delimiters
    pub text: &'a str,
}

/// Normalized command identity: upper-case letter plus integer number.
///
/// `g01`, `G1` and `G001` all map to `G1`, while `G10` stays distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandCode {
    pub letter: char,
    pub number: u32,
}

impl CommandCode {
    pub const RAPID_MOVE: Self = Self::new('G', 0);
    pub const LINEAR_MOVE: Self = Self::new('G', 1);
    pub const SET_POSITION: Self = Self::new('G', 92);
    pub const ABSOLUTE_EXTRUSION: Self = Self::new('M', 82);
    pub const RELATIVE_EXTRUSION: Self = Self::new('M', 83);

    pub const fn new(letter: char, number: u32) -> Self {
        Self { letter, number }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.number)
    }
}

impl Command<'_> {
    /// Normalized code, or `None` for words like "T" or "G1.5"
    pub fn code(&self) -> Option<CommandCode> {
        let mut chars = self.name.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let number = chars.as_str().parse::<u32>().ok()?;
        Some(CommandCode::new(letter, number))
    }

    pub fn is(&self, code: CommandCode) -> bool {
        self.code() == Some(code)
    }

    /// Numeric value of the first parameter with the given letter (case-insensitive)
    pub fn param(&self, letter: char) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.letter.eq_ignore_ascii_case(&letter))
            .and_then(Parameter::number)
    }
}

impl Parameter<'_> {
    /// Parse the value as a signed decimal; accepts ".5", "-.5" and "+1"
    pub fn number(&self) -> Option<f64> {
        self.value.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Convert tokens into a parsed line
pub fn tokens_to_parsed_line(tokens: Vec<Token<'_>>) -> ParsedLine<'_> {
    let comment = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Comment)
        .map(|t| Comment {
            text: extract_comment_text(t.text),
        });

    match tokens.iter().find(|t| t.kind == TokenKind::Command) {
        Some(cmd_token) => {
            let parameters = tokens
                .iter()
                .filter(|t| t.kind == TokenKind::Parameter)
                .filter_map(|t| parse_parameter_token(t.text))
                .collect();

            ParsedLine::Command(Command {
                name: cmd_token.text,
                parameters,
                comment,
            })
        }
        None => comment.map_or(ParsedLine::Empty, ParsedLine::Comment),
    }
}

fn parse_parameter_token(text: &str) -> Option<Parameter<'_>> {
    let mut chars = text.chars();
    let letter = chars.next()?;

    if !letter.is_ascii_alphabetic() || chars.as_str().is_empty() {
        return None;
    }

    Some(Parameter {
        letter,
        value: chars.as_str(),
    })
}

fn extract_comment_text(text: &str) -> &str {
    if let Some(stripped) = text.strip_prefix(';') {
        stripped
    } else if let Some(inner) = text.strip_prefix('(') {
        inner.strip_suffix(')').unwrap_or(inner)
    } else {
        text
    }
}

//! G-code Lexer
//!
//! Splits one line into command words, parameter words and comments.
//! A word is a single letter followed by its number body, so compact
//! lines such as `G1X10E.5` split the same way as `G1 X10 E.5`.
//! Tokens borrow from the input line; nothing is allocated per token.

/// Token types in G-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Command word like "G1", "M83"
    Command,
    /// Parameter word like "X10", "E.4"
    Parameter,
    /// Comment (semicolon or parenthetical)
    Comment,
}

/// A token borrowing its text from the tokenized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn comment(text: &'a str) -> Self {
        Self {
            kind: TokenKind::Comment,
            text,
        }
    }

    /// G/M/T words are commands; every other letter starts a parameter
    fn word(text: &'a str) -> Self {
        let kind = match text.as_bytes()[0].to_ascii_uppercase() {
            b'G' | b'M' | b'T' => TokenKind::Command,
            _ => TokenKind::Parameter,
        };
        Self { kind, text }
    }
}

/// Tokenize a line of G-code
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        match bytes[pos] {
            b';' => {
                tokens.push(Token::comment(&line[start..]));
                break;
            }
            b'(' => {
                pos = line[start..]
                    .find(')')
                    .map_or(bytes.len(), |close| start + close + 1);
                tokens.push(Token::comment(&line[start..pos]));
            }
            b if b.is_ascii_alphabetic() => {
                pos += 1 + number_body_len(&bytes[pos + 1..]);
                tokens.push(Token::word(&line[start..pos]));
            }
            // Whitespace, checksums and stray characters
            _ => pos += line[start..].chars().next().map_or(1, char::len_utf8),
        }
    }

    tokens
}

/// Length of the number following a word letter: digits, '.', and signs.
fn number_body_len(rest: &[u8]) -> usize {
    rest.iter()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
        .count()
}

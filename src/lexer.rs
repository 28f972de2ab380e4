use crate::token::{Token, TokenKind};
use custom_error::custom_error;
use tracing::debug;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub LexError

    UnterminatedString{line: usize} = "unclosed string (starting at line {line})",
    InvalidCharacter{ch: char, line: usize} = "invalid character {ch:?} (line {line})",
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line } | Self::InvalidCharacter { line, .. } => *line,
        }
    }
}

/// Splits source text into tokens. Any lexical error aborts the whole
/// invocation.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).collect::<Result<Vec<_>, _>>()?;
    debug!(count = tokens.len(), "lexed source");
    Ok(tokens)
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: Option<char>,
    line: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '\'' | '(' | ')' | '[' | ']' | '{' | '}')
}

fn is_key_start(c: char) -> bool {
    ('!'..='@').contains(&c) || c == '|' || c == '~'
}

fn parse_number(text: &str) -> Option<f64> {
    if let Some(hex) = text.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    if let Some(bin) = text.strip_prefix("0b") {
        return i64::from_str_radix(bin, 2).ok().map(|n| n as f64);
    }

    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => ("", unsigned),
    };
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if fraction.is_empty() || !digits(whole) || !digits(fraction) {
        return None;
    }
    text.parse().ok()
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace_and_comments();

        let c = match self.ch {
            Some(c) => c,
            None => return Ok(None),
        };
        let line = self.line;

        let kind = match c {
            '\n' => {
                self.line += 1;
                TokenKind::Newline
            }
            '\'' => return self.read_string().map(Some),
            c if c.is_control() => return Err(LexError::InvalidCharacter { ch: c, line }),
            c => match TokenKind::from_bracket(c) {
                Some(bracket) => bracket,
                None => return Ok(Some(self.read_atom())),
            },
        };
        self.read_char();
        Ok(Some(Token::new(kind, line)))
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let mut text = String::new();
        self.read_char();

        loop {
            match self.ch {
                None => return Err(LexError::UnterminatedString { line }),
                Some('\'') => break,
                Some('\\') => {
                    match self.peek_char() {
                        Some('\'') => text.push('\''),
                        Some('\\') => text.push('\\'),
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(other) => {
                            if other == '\n' {
                                self.line += 1;
                            }
                            text.push('\\');
                            text.push(other);
                        }
                        None => return Err(LexError::UnterminatedString { line }),
                    }
                    self.read_char();
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    text.push(c);
                }
            }
            self.read_char();
        }
        // closing quote
        self.read_char();

        Ok(Token::new(TokenKind::StringLit(text), line))
    }

    fn read_atom(&mut self) -> Token {
        let start = self.position;
        while matches!(self.ch, Some(c) if !is_delimiter(c)) {
            self.read_char();
        }
        let text: String = self.input[start..self.position].iter().collect();

        let kind = if let Some(n) = parse_number(&text) {
            TokenKind::NumberLit(n)
        } else if text.starts_with(is_key_start) {
            TokenKind::Key(text)
        } else {
            TokenKind::Word(text)
        };
        Token::new(kind, self.line)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.ch {
            if c == ',' {
                while !matches!(self.ch, Some('\n') | None) {
                    self.read_char();
                }
            } else if c.is_whitespace() && c != '\n' {
                self.read_char();
            } else {
                break;
            }
        }
    }
}

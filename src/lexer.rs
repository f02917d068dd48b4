use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::ast::Token;

/// Numeric literal at the start of the remaining input: `42`, `1_000`,
/// `3.14`, `.5`, `5.`, `1e5`, `2.5E-3`.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d(?:_?\d)*)?\.\d(?:_?\d)*|\d(?:_?\d)*\.?)(?:[eE][+-]?\d(?:_?\d)*)?")
        .expect("numeric literal pattern")
});

/// Errors produced while lexing an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that cannot start any token
    UnexpectedChar { ch: char, position: usize },

    /// String literal without its closing quote
    UnterminatedString { position: usize },

    /// Malformed number (`012`, `3x`) or one that does not fit an `i128`
    InvalidNumber { text: String, position: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::UnterminatedString { position } => {
                write!(f, "Unterminated string starting at position {}", position)
            }
            LexError::InvalidNumber { text, position } => {
                write!(f, "Invalid number '{}' at position {}", text, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some(c @ ('"' | '\'' | '\\')) => result.push(c),
                        // Unknown escapes keep their backslash
                        Some(c) => {
                            result.push('\\');
                            result.push(c);
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let rest: String = self.input[self.position..].iter().collect();
        let text = match NUMBER.find(&rest) {
            Some(m) => m.as_str().to_string(),
            None => {
                return Err(LexError::InvalidNumber {
                    text: rest.chars().take(1).collect(),
                    position: start,
                });
            }
        };
        self.position += text.chars().count();

        let invalid = |text: &str| LexError::InvalidNumber {
            text: text.to_string(),
            position: start,
        };

        // `3x` and `1.5abc` are not numbers followed by names
        if self
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            let mut text = text;
            text.push_str(&self.read_identifier());
            return Err(invalid(&text));
        }

        let digits = text.replace('_', "");
        if digits.contains(['.', 'e', 'E']) {
            digits
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| invalid(&text))
        } else {
            // Decimal integers other than zero cannot have leading zeros
            if digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
                return Err(invalid(&text));
            }
            digits
                .parse::<i128>()
                .map(Token::Integer)
                .map_err(|_| invalid(&text))
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('+') => {
                self.advance();
                Token::Plus
            }
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('*') => {
                if self.peek_char(1) == Some('*') {
                    self.advance();
                    self.advance();
                    Token::DoubleStar
                } else {
                    self.advance();
                    Token::Star
                }
            }
            Some('/') => {
                if self.peek_char(1) == Some('/') {
                    self.advance();
                    self.advance();
                    Token::DoubleSlash
                } else {
                    self.advance();
                    Token::Slash
                }
            }
            Some('%') => {
                self.advance();
                Token::Percent
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(q @ ('"' | '\'')) => Token::String(self.read_string(q)?),
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => Token::Identifier(self.read_identifier()),
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position,
                });
            }
        };

        Ok(token)
    }
}

#[test]
fn test_double_char_operators() {
    let mut lexer = Lexer::new("2**3 // 4");
    assert_eq!(lexer.next_token(), Ok(Token::Integer(2)));
    assert_eq!(lexer.next_token(), Ok(Token::DoubleStar));
    assert_eq!(lexer.next_token(), Ok(Token::Integer(3)));
    assert_eq!(lexer.next_token(), Ok(Token::DoubleSlash));
    assert_eq!(lexer.next_token(), Ok(Token::Integer(4)));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("1_000 .5 5. 1e3 2.5E-1");
    assert_eq!(lexer.next_token(), Ok(Token::Integer(1000)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(0.5)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(5.0)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(1000.0)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(0.25)));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_invalid_numbers() {
    assert!(matches!(
        Lexer::new("012").next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
    assert!(matches!(
        Lexer::new("3x").next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
    assert_eq!(Lexer::new("000").next_token(), Ok(Token::Integer(0)));
}

use std::{fmt, mem};

use crate::{
    ast::{BinOp, Expr, Token, UnaryOp},
    lexer::{LexError, Lexer},
};

/// Errors produced while parsing an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer rejected the input
    Lex(LexError),

    /// A token that does not fit the grammar at this point
    UnexpectedToken { expected: &'static str, found: Token },

    /// Nesting or operator chains deeper than [`MAX_DEPTH`]
    TooDeep,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, got {:?}", expected, found)
            }
            ParseError::TooDeep => write!(f, "Expression nested too deeply"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::UnexpectedToken { .. } | ParseError::TooDeep => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// How deep parentheses, signs, powers and operator chains may stack up.
/// Every `(`, leading sign, `**` and binary operator in a chain counts one
/// level while it is open.
pub const MAX_DEPTH: usize = 200;

/// Recursive-descent parser for the arithmetic grammar:
///
/// ```text
/// expression     := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := unary (("*" | "/" | "//" | "%") unary)*
/// unary          := ("+" | "-") unary | power
/// power          := primary ("**" unary)?
/// primary        := number | string | identifier | "(" expression ")"
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
        })
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token, name: &'static str) -> Result<(), ParseError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.unexpected(name));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.clone(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let expr = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Float(n) => Expr::Float(n),
            Token::Integer(n) => Expr::Integer(n),
            Token::String(s) => Expr::String(s),
            Token::Identifier(name) => Expr::Variable(name),
            Token::LParen => {
                self.advance()?;
                self.descend()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen, "')'")?;
                self.depth -= 1;
                return Ok(expr);
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("a number, string, name or '('"));
            }
        };
        self.advance()?;
        Ok(expr)
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;

        if self.current_token == Token::DoubleStar {
            self.advance()?;
            // Right-associative, and `2**-1` is allowed
            self.descend()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::BinaryOp {
                op: BinOp::Power,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_token {
            Token::Minus => UnaryOp::Negate,
            Token::Plus => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.advance()?;
        self.descend()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;
        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current_token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                Token::DoubleSlash => BinOp::FloorDivide,
                Token::Percent => BinOp::Modulo,
                _ => break,
            };

            self.advance()?;
            // Each link deepens the left-leaning tree
            self.descend()?;
            let right = self.parse_unary()?;

            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };

            self.advance()?;
            // Each link deepens the left-leaning tree
            self.descend()?;
            let right = self.parse_multiplicative()?;

            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.depth = depth;
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_additive()
    }

    /// Parse a complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof, "end of expression")?;
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Expr, ParseError> {
        Parser::new(Lexer::new(input))?.parse()
    }

    #[test]
    fn power_binds_tighter_than_negation() {
        let expr = parse("-2**2").unwrap();
        assert_eq!(
            expr,
            Expr::UnaryOp {
                op: UnaryOp::Negate,
                operand: Box::new(Expr::BinaryOp {
                    op: BinOp::Power,
                    left: Box::new(Expr::Integer(2)),
                    right: Box::new(Expr::Integer(2)),
                }),
            }
        );
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2**3**2").unwrap();
        let Expr::BinaryOp { op, right, .. } = expr else {
            panic!("expected power");
        };
        assert_eq!(op, BinOp::Power);
        assert!(matches!(*right, Expr::BinaryOp { op: BinOp::Power, .. }));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            parse("hello world"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(parse("(1, 2)").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn reports_lex_errors() {
        assert!(matches!(parse("[1]"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn limits_nesting() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&nested(MAX_DEPTH)), Ok(Expr::Integer(1)));
        assert_eq!(parse(&nested(MAX_DEPTH + 1)), Err(ParseError::TooDeep));
        assert_eq!(parse(&nested(5_000)), Err(ParseError::TooDeep));
        assert_eq!(parse(&"-".repeat(5_000)), Err(ParseError::TooDeep));
        assert_eq!(parse(&"2**".repeat(5_000)), Err(ParseError::TooDeep));
    }

    #[test]
    fn limits_operator_chains() {
        assert!(parse(&vec!["1"; 100].join("+")).is_ok());
        assert_eq!(parse(&vec!["1"; 20_000].join("+")), Err(ParseError::TooDeep));
        assert_eq!(parse(&vec!["2"; 20_000].join("*")), Err(ParseError::TooDeep));
    }

    #[test]
    fn depth_is_released_after_each_group() {
        let groups = vec!["(1)"; 150].join("*");
        assert!(parse(&groups).is_ok());
    }
}

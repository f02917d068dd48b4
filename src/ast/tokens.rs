/// Lexical token of an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// .5
    /// 1e5
    /// ```
    Float(f64),

    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 1_000
    /// ```
    Integer(i128),

    /// String literal in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// "item #1"
    /// ```
    String(String),

    /// Variable name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    Identifier(String),

    // Arithmetic
    /// Addition or string concatenation
    Plus,

    /// Subtraction or negation
    Minus,

    /// Multiplication
    Star,

    /// Power (`**`)
    DoubleStar,

    /// True division
    Slash,

    /// Floor division (`//`)
    DoubleSlash,

    /// Modulo
    Percent,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

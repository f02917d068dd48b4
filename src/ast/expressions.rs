use crate::ast::{BinOp, UnaryOp};

/// Abstract Syntax Tree node of an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Literal floating point number
    Float(f64),

    /// Literal integer
    Integer(i128),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// 'hello'
    /// ```
    String(String),

    // References
    /// Name of a previously defined variable
    ///
    /// # Example
    /// ```text
    /// width
    /// ```
    Variable(String),

    // Operations
    /// Prefix operation
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Binary arithmetic operation
    ///
    /// # Examples
    /// ```text
    /// width * height
    /// 2 ** 10
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

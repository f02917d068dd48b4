/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// True division (`/`)
    Divide,
    /// Floor division (`//`)
    FloorDivide,
    /// Modulo (`%`)
    Modulo,
    /// Exponentiation (`**`)
    Power,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Negate,
}

//! # Arithmetic expressions
//!
//! Values on the right-hand side of a line may be small arithmetic
//! expressions over numbers and the names of variables defined on earlier
//! lines:
//!
//! ```text
//! width=3
//! height=4
//! area=width*height
//! half=area/2
//! ```
//!
//! After variable substitution the value text is lexed into [`Token`]s,
//! parsed into an [`Expr`] tree and evaluated with these rules:
//!
//! - `/` always produces a float, `//` floors, `%` follows the sign of the
//!   divisor
//! - `**` is right-associative and binds tighter than a leading `-`
//! - any float operand makes the result a float
//! - `+` on two strings concatenates them
//! - integers are 128-bit and overflow is an error
//! - nesting deeper than [`MAX_DEPTH`](crate::parser::MAX_DEPTH) is a parse
//!   error
//!
//! Anything outside this grammar (comparisons, calls, container literals)
//! is a parse error, and the caller keeps the original text.
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::{BinOp, UnaryOp};

use std::fmt;

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    store::Store,
    value::Value,
};

/// Errors that can occur while evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Type mismatch or invalid operation for the given type
    TypeError(String),

    /// Name not defined on an earlier line
    UndefinedVariable(String),

    /// Division or modulo by zero, or zero raised to a negative power
    DivisionByZero,

    /// Integer result outside the `i128` range, a power overflowing `f64`, or
    /// a repeated string longer than [`MAX_REPEAT_LEN`]
    Overflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
            EvalError::UndefinedVariable(name) => write!(f, "Undefined variable: {}", name),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Overflow => write!(f, "Numeric overflow"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates expression trees against the variables read so far.
pub struct Evaluator<'a> {
    variables: &'a Store,
}

impl<'a> Evaluator<'a> {
    pub fn new(variables: &'a Store) -> Self {
        Evaluator { variables }
    }

    /// Evaluates an expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use varhandler::{Evaluator, Lexer, Parser, Store, Value};
    ///
    /// let mut vars = Store::new();
    /// vars.insert("width", Value::Integer(3));
    ///
    /// let expr = Parser::new(Lexer::new("width * 4")).unwrap().parse().unwrap();
    /// let result = Evaluator::new(&vars).eval(&expr).unwrap();
    /// assert_eq!(result, Value::Integer(12));
    /// ```
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Variable(name) => self
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expr::UnaryOp { op, operand } => {
                let value = self.eval(operand)?;
                apply_unary(*op, &value)
            }
            Expr::BinaryOp { op, left, right } => {
                let left_val = self.eval(left)?;
                let right_val = self.eval(right)?;
                apply_binop(*op, &left_val, &right_val)
            }
        }
    }
}

fn apply_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Plus, Value::Integer(_) | Value::Float(_)) => Ok(value.clone()),
        (UnaryOp::Negate, Value::Integer(n)) => {
            n.checked_neg().map(Value::Integer).ok_or(EvalError::Overflow)
        }
        (UnaryOp::Negate, Value::Float(n)) => Ok(Value::Float(-n)),
        (_, Value::String(_)) => Err(EvalError::TypeError(
            "bad operand type for unary operator: string".to_string(),
        )),
    }
}

/// Float `divmod` where the remainder takes the sign of the divisor.
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(b);
    }
    let mut floor = div.floor();
    if div - floor > 0.5 {
        floor += 1.0;
    }
    (floor, rem)
}

fn int_floor_div(a: i128, b: i128) -> Result<i128, EvalError> {
    let q = a.checked_div(b).ok_or(EvalError::Overflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

fn int_modulo(a: i128, b: i128) -> i128 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r }
}

fn int_power(a: i128, b: i128) -> Result<Value, EvalError> {
    if b >= 0 {
        // These bases stay small for any exponent
        match a {
            0 | 1 if b > 0 => return Ok(Value::Integer(a)),
            -1 => return Ok(Value::Integer(if b % 2 == 0 { 1 } else { -1 })),
            _ => {}
        }
        let exp = u32::try_from(b).map_err(|_| EvalError::Overflow)?;
        return a
            .checked_pow(exp)
            .map(Value::Integer)
            .ok_or(EvalError::Overflow);
    }
    if a == 0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::Float((a as f64).powf(b as f64)))
}

fn float_power(a: f64, b: f64) -> Result<Value, EvalError> {
    if a == 0.0 && b < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if a < 0.0 && b.fract() != 0.0 {
        return Err(EvalError::TypeError(
            "negative number raised to a fractional power".to_string(),
        ));
    }
    let result = a.powf(b);
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(EvalError::Overflow);
    }
    Ok(Value::Float(result))
}

/// Longest string, in bytes, that `str * int` may build.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

fn repeat(s: &str, n: i128) -> Result<Value, EvalError> {
    if s.is_empty() || n <= 0 {
        return Ok(Value::String(String::new()));
    }
    let count = usize::try_from(n).map_err(|_| EvalError::Overflow)?;
    match s.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::String(s.repeat(count))),
        _ => Err(EvalError::Overflow),
    }
}

fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    use Value::{Float, Integer, String};

    match (op, left, right) {
        // Integer arithmetic stays integral, except true division
        (BinOp::Add, Integer(a), Integer(b)) => {
            a.checked_add(*b).map(Integer).ok_or(EvalError::Overflow)
        }
        (BinOp::Subtract, Integer(a), Integer(b)) => {
            a.checked_sub(*b).map(Integer).ok_or(EvalError::Overflow)
        }
        (BinOp::Multiply, Integer(a), Integer(b)) => {
            a.checked_mul(*b).map(Integer).ok_or(EvalError::Overflow)
        }
        (BinOp::FloorDivide | BinOp::Modulo, Integer(_), Integer(0)) => {
            Err(EvalError::DivisionByZero)
        }
        (BinOp::FloorDivide, Integer(a), Integer(b)) => int_floor_div(*a, *b).map(Integer),
        (BinOp::Modulo, Integer(a), Integer(b)) => Ok(Integer(int_modulo(*a, *b))),
        (BinOp::Power, Integer(a), Integer(b)) => int_power(*a, *b),

        // Strings
        (BinOp::Add, String(a), String(b)) => Ok(String(format!("{}{}", a, b))),
        (BinOp::Multiply, String(s), Integer(n)) | (BinOp::Multiply, Integer(n), String(s)) => {
            repeat(s, *n)
        }
        (_, String(_), _) | (_, _, String(_)) => Err(EvalError::TypeError(format!(
            "unsupported operand types for {:?}: {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),

        // True division, and anything with a float operand
        _ => {
            let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                unreachable!("string operands handled above")
            };
            match op {
                BinOp::Add => Ok(Float(a + b)),
                BinOp::Subtract => Ok(Float(a - b)),
                BinOp::Multiply => Ok(Float(a * b)),
                BinOp::Divide if b == 0.0 => Err(EvalError::DivisionByZero),
                BinOp::Divide => Ok(Float(a / b)),
                BinOp::FloorDivide | BinOp::Modulo if b == 0.0 => Err(EvalError::DivisionByZero),
                BinOp::FloorDivide => Ok(Float(float_divmod(a, b).0)),
                BinOp::Modulo => Ok(Float(float_divmod(a, b).1)),
                BinOp::Power => float_power(a, b),
            }
        }
    }
}

//! Expression values: tokenize, substitute known variables, evaluate.
//!
//! A value such as `width*height` is first cut into fragments at operator
//! characters. Fragments made only of letters name variables from earlier
//! lines and are replaced by those variables' literal form. The fragments
//! are joined back into one string, which is parsed and evaluated as
//! arithmetic. Whatever goes wrong along the way, the caller gets the
//! original text back.

use std::fmt;

use crate::{
    evaluator::{EvalError, Evaluator},
    lexer::Lexer,
    parser::{ParseError, Parser},
    store::Store,
    value::Value,
};

/// Characters that end the current fragment and stand alone.
/// `**` and `//` come out as two adjacent fragments.
pub const OPERATORS: [char; 11] = ['+', '-', '*', '/', '%', '(', ')', '[', ']', '{', '}'];

fn is_operator(ch: char) -> bool {
    OPERATORS.contains(&ch)
}

/// A piece of an expression value, as cut by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A single operator character
    Operator(char),
    /// Digits, optionally led by a unary minus
    Number(String),
    /// Letters only; refers to a variable
    Name(String),
    /// Anything else, passed through as written
    Other(String),
}

impl Fragment {
    fn classify(text: String) -> Self {
        let digits = text.strip_prefix('-').unwrap_or(&text);
        if !digits.is_empty() && digits.chars().all(char::is_numeric) {
            Fragment::Number(text)
        } else if !text.is_empty() && text.chars().all(char::is_alphabetic) {
            Fragment::Name(text)
        } else {
            Fragment::Other(text)
        }
    }
}

/// Cuts `expression` into fragments, left to right.
///
/// A `-` starts a number instead of being an operator when it opens the
/// expression or follows another operator, and a digit comes right after it.
///
/// ```
/// use varhandler::convert::{Fragment, tokenize};
///
/// assert_eq!(
///     tokenize("a*-2"),
///     vec![
///         Fragment::Name("a".into()),
///         Fragment::Operator('*'),
///         Fragment::Number("-2".into()),
///     ]
/// );
/// ```
pub fn tokenize(expression: &str) -> Vec<Fragment> {
    let chars: Vec<char> = expression.chars().collect();
    let mut fragments = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        let negative_literal = ch == '-'
            && (i == 0 || is_operator(chars[i - 1]))
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());

        if is_operator(ch) && !negative_literal {
            if !current.is_empty() {
                fragments.push(Fragment::classify(std::mem::take(&mut current)));
            }
            fragments.push(Fragment::Operator(ch));
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        fragments.push(Fragment::classify(current));
    }

    fragments
}

/// Rewrites `expression` with every variable name replaced by the literal
/// form of its value in `known`.
///
/// Fails with [`EvalError::UndefinedVariable`] when a name is not in `known`.
pub fn convert_expression(expression: &str, known: &Store) -> Result<String, EvalError> {
    let mut converted = String::with_capacity(expression.len());

    for fragment in tokenize(expression) {
        match fragment {
            Fragment::Name(name) => {
                let value = known
                    .get(&name)
                    .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                let source = value.to_source().ok_or_else(|| {
                    EvalError::TypeError(format!("'{}' has no literal form ({})", name, value))
                })?;
                converted.push_str(&source);
            }
            Fragment::Operator(op) => converted.push(op),
            Fragment::Number(text) | Fragment::Other(text) => converted.push_str(&text),
        }
    }

    Ok(converted)
}

/// Why an expression value could not be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::Parse(e) => write!(f, "Parse error: {}", e),
            ExpressionError::Eval(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

impl std::error::Error for ExpressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExpressionError::Parse(e) => Some(e),
            ExpressionError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for ExpressionError {
    fn from(e: ParseError) -> Self {
        ExpressionError::Parse(e)
    }
}

impl From<EvalError> for ExpressionError {
    fn from(e: EvalError) -> Self {
        ExpressionError::Eval(e)
    }
}

/// Evaluates `expression` against `known`, reporting why it failed.
pub fn try_evaluate(expression: &str, known: &Store) -> Result<Value, ExpressionError> {
    let converted = convert_expression(expression, known)?;
    let expr = Parser::new(Lexer::new(&converted))?.parse()?;
    Ok(Evaluator::new(known).eval(&expr)?)
}

/// Evaluates `expression` against `known`, or returns it unchanged as a
/// string if it is not a valid arithmetic expression over known names.
///
/// ```
/// use varhandler::{Store, Value, evaluate_expression};
///
/// let mut known = Store::new();
/// known.insert("width", Value::Integer(3));
/// known.insert("height", Value::Integer(4));
///
/// assert_eq!(evaluate_expression("width*height", &known), Value::Integer(12));
/// assert_eq!(evaluate_expression("hello", &known), Value::from("hello"));
/// ```
pub fn evaluate_expression(expression: &str, known: &Store) -> Value {
    try_evaluate(expression, known).unwrap_or_else(|_| Value::String(expression.to_string()))
}

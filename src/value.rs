use std::fmt;

/// An interpreted variable value.
///
/// Values read from a file are either kept as text or coerced by the
/// expression evaluator into a number. Container literals such as `[1, 2]`
/// are never parsed and travel as opaque strings.
///
/// # Rendering
///
/// [`Display`](fmt::Display) renders values the way they are written back to
/// a file: strings verbatim, integers in decimal, floats in their shortest
/// round-trip form with a trailing `.0` for integral values and scientific
/// notation outside `1e-4..1e16`.
///
/// ```
/// use varhandler::Value;
///
/// assert_eq!(Value::Integer(12).to_string(), "12");
/// assert_eq!(Value::Float(2.0).to_string(), "2.0");
/// assert_eq!(Value::Float(1e20).to_string(), "1e+20");
/// assert_eq!(Value::String("[1, 2]".into()).to_string(), "[1, 2]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, including quoted strings and bracketed container literals
    String(String),

    /// Integer number (kept apart from floats)
    Integer(i128),

    /// Floating-point number
    Float(f64),
}

impl Value {
    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(_) => None,
        }
    }

    /// Get as string slice, if the value is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
        }
    }

    /// Source text that reads back as this value inside an arithmetic
    /// expression. Negative numbers are parenthesised so that `x**2` with
    /// `x = -3` stays `(-3)**2`.
    ///
    /// Returns `None` for non-finite floats, which have no literal form.
    pub fn to_source(&self) -> Option<String> {
        match self {
            Value::Integer(n) if *n < 0 => Some(format!("({})", n)),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(f) if !f.is_finite() => None,
            Value::Float(f) if f.is_sign_negative() => Some(format!("({})", format_float(*f))),
            Value::Float(f) => Some(format_float(*f)),
            Value::String(s) => {
                let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
                Some(format!("'{}'", escaped))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => f.write_str(&format_float(*n)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n.into())
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

/// Shortest round-trip rendering of a float, `repr`-style.
pub(crate) fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = n.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

#[test]
fn test_format_float() {
    assert_eq!(format_float(3.5), "3.5");
    assert_eq!(format_float(-2.0), "-2.0");
    assert_eq!(format_float(0.1), "0.1");
    assert_eq!(format_float(1.5e-7), "1.5e-07");
    assert_eq!(format_float(1e16), "1e+16");
    assert_eq!(format_float(123456789.0), "123456789.0");
    assert_eq!(format_float(f64::NAN), "nan");
}

#[test]
fn test_to_source() {
    assert_eq!(Value::Integer(-3).to_source().as_deref(), Some("(-3)"));
    assert_eq!(Value::Float(2.5).to_source().as_deref(), Some("2.5"));
    assert_eq!(Value::String("it's".into()).to_source().as_deref(), Some("'it\\'s'"));
    assert_eq!(Value::Float(f64::INFINITY).to_source(), None);
}

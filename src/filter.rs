use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{error::VarError, interpret::Interpretation, store::Store, value::Value};

/// Float text with `_` digit separators, e.g. `1_000.5`.
static UNDERSCORED_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d(?:_?\d)*)?(?:\.(?:\d(?:_?\d)*)?)?(?:[eE][+-]?\d(?:_?\d)*)?$")
        .expect("float pattern")
});

/// Kind of value a filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    String,
    Integer,
    Float,
    List,
    Tuple,
    Dict,
}

impl Datatype {
    /// Whether `value`, produced under `interpretation`, is of this kind.
    ///
    /// Literal values are judged by their text: quotes for strings, digits
    /// for integers, a non-integral float reading for floats. Evaluated
    /// values are judged by their variant. Containers are recognised by
    /// their brackets alone in both cases.
    pub fn matches(self, value: &Value, interpretation: Interpretation) -> bool {
        match (self, interpretation) {
            (Datatype::List, _) => bracketed(&value.to_string(), '[', ']'),
            (Datatype::Tuple, _) => bracketed(&value.to_string(), '(', ')'),
            (Datatype::Dict, _) => bracketed(&value.to_string(), '{', '}'),

            (Datatype::String, Interpretation::EvaluateExpression) => {
                matches!(value, Value::String(_))
            }
            (Datatype::Integer, Interpretation::EvaluateExpression) => {
                matches!(value, Value::Integer(_))
            }
            (Datatype::Float, Interpretation::EvaluateExpression) => {
                matches!(value, Value::Float(_))
            }

            (Datatype::String, Interpretation::PreserveLiteral) => {
                let text = value.to_string();
                bracketed(&text, '"', '"') || bracketed(&text, '\'', '\'')
            }
            (Datatype::Integer, Interpretation::PreserveLiteral) => {
                let text = value.to_string();
                !text.is_empty() && text.chars().all(char::is_numeric)
            }
            (Datatype::Float, Interpretation::PreserveLiteral) => is_float(&value.to_string()),
        }
    }
}

impl FromStr for Datatype {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "str" | "string" => Ok(Datatype::String),
            "int" | "integer" => Ok(Datatype::Integer),
            "float" => Ok(Datatype::Float),
            "list" => Ok(Datatype::List),
            "tuple" => Ok(Datatype::Tuple),
            "dict" | "mapping" => Ok(Datatype::Dict),
            _ => Err(VarError::UnknownDatatype(s.to_string())),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Datatype::String => "str",
            Datatype::Integer => "int",
            Datatype::Float => "float",
            Datatype::List => "list",
            Datatype::Tuple => "tuple",
            Datatype::Dict => "dict",
        };
        f.write_str(name)
    }
}

fn bracketed(text: &str, open: char, close: char) -> bool {
    text.starts_with(open) && text.ends_with(close)
}

/// True when `text` reads as a float that is not a whole number.
/// `nan` and `inf` count as floats.
pub fn is_float(text: &str) -> bool {
    let text = text.trim();
    let parsed = if text.contains('_') {
        if !UNDERSCORED_FLOAT.is_match(text) {
            return false;
        }
        text.replace('_', "").parse::<f64>()
    } else {
        text.parse::<f64>()
    };

    match parsed {
        Ok(n) => n.fract() != 0.0 || !n.is_finite(),
        Err(_) => false,
    }
}

/// Keeps the entries of `store` that match `datatype`; `None` keeps all.
pub fn filter_store(
    mut store: Store,
    datatype: Option<Datatype>,
    interpretation: Interpretation,
) -> Store {
    if let Some(datatype) = datatype {
        store.retain(|_, value| datatype.matches(value, interpretation));
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_float_detection() {
        assert!(is_float("3.5"));
        assert!(is_float("-0.25"));
        assert!(is_float("1_000.5"));
        assert!(is_float("nan"));
        assert!(is_float("inf"));
        assert!(!is_float("3.0"));
        assert!(!is_float("42"));
        assert!(!is_float("1e3"));
        assert!(!is_float("1__0.5"));
        assert!(!is_float("abc"));
    }

    #[test]
    fn literal_string_needs_matching_quotes() {
        let literal = Interpretation::PreserveLiteral;
        assert!(Datatype::String.matches(&Value::from("\"hi\""), literal));
        assert!(Datatype::String.matches(&Value::from("'hi'"), literal));
        assert!(!Datatype::String.matches(&Value::from("hi"), literal));
        assert!(!Datatype::String.matches(&Value::from("\"hi'"), literal));
    }

    #[test]
    fn containers_by_brackets_only() {
        for interpretation in [Interpretation::PreserveLiteral, Interpretation::EvaluateExpression] {
            assert!(!Datatype::List.matches(&Value::from("[1, 2"), interpretation));
            assert!(Datatype::List.matches(&Value::from("[not, a list]"), interpretation));
            assert!(Datatype::Tuple.matches(&Value::from("(1, 2)"), interpretation));
            assert!(Datatype::Dict.matches(&Value::from("{'a': 1}"), interpretation));
            assert!(!Datatype::Dict.matches(&Value::Integer(1), interpretation));
        }
    }

    #[test]
    fn evaluated_values_by_variant() {
        let evaluated = Interpretation::EvaluateExpression;
        assert!(Datatype::Integer.matches(&Value::Integer(5), evaluated));
        assert!(!Datatype::Integer.matches(&Value::from("5"), evaluated));
        assert!(Datatype::Float.matches(&Value::Float(2.0), evaluated));
        assert!(Datatype::String.matches(&Value::from("[1]"), evaluated));
    }

    #[test]
    fn datatype_names() {
        assert_eq!("int".parse::<Datatype>().unwrap(), Datatype::Integer);
        assert_eq!("Mapping".parse::<Datatype>().unwrap(), Datatype::Dict);
        assert!(matches!(
            "set".parse::<Datatype>(),
            Err(VarError::UnknownDatatype(name)) if name == "set"
        ));
    }
}

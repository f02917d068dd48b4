use crate::{convert::evaluate_expression, store::Store, value::Value};

/// How a raw value string becomes a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpretation {
    /// Keep values as text. A value wrapped in single quotes loses them;
    /// double quotes are kept.
    PreserveLiteral,

    /// Evaluate each value as an arithmetic expression over the variables
    /// defined above it, keeping the text when evaluation fails.
    #[default]
    EvaluateExpression,
}

impl Interpretation {
    pub fn interpret(self, raw: &str, known: &Store) -> Value {
        match self {
            Interpretation::PreserveLiteral => Value::String(strip_single_quotes(raw).to_string()),
            Interpretation::EvaluateExpression => evaluate_expression(raw, known),
        }
    }
}

fn strip_single_quotes(raw: &str) -> &str {
    if raw == "'" {
        return "";
    }
    match raw.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(inner) => inner,
        None => raw,
    }
}

#[test]
fn test_preserve_literal_quotes() {
    let known = Store::new();
    let interpret = |raw| Interpretation::PreserveLiteral.interpret(raw, &known);
    assert_eq!(interpret("'hello'"), Value::from("hello"));
    assert_eq!(interpret("\"hello\""), Value::from("\"hello\""));
    assert_eq!(interpret("'"), Value::from(""));
    assert_eq!(interpret("'half"), Value::from("'half"));
    assert_eq!(interpret("1+2"), Value::from("1+2"));
}

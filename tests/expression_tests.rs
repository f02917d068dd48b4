use varhandler::{
    EvalError, Store, Value,
    convert::{ExpressionError, try_evaluate},
    evaluate_expression,
};

fn vars(pairs: Vec<(&str, Value)>) -> Store {
    pairs.into_iter().collect()
}

fn eval(expr: &str) -> Value {
    evaluate_expression(expr, &Store::new())
}

// ============================================================================
// Variable substitution
// ============================================================================

#[test]
fn test_product_of_known_variables() {
    let known = vars(vec![("width", Value::Integer(3)), ("height", Value::Integer(4))]);
    assert_eq!(evaluate_expression("width*height", &known), Value::Integer(12));
}

#[test]
fn test_spaces_around_operators() {
    let known = vars(vec![("a", Value::Integer(1)), ("b", Value::Integer(2))]);
    assert_eq!(evaluate_expression("a + b", &known), Value::Integer(3));
    assert_eq!(evaluate_expression("( a + b ) * 10", &known), Value::Integer(30));
}

#[test]
fn test_float_and_string_variables() {
    let known = vars(vec![
        ("rate", Value::Float(0.5)),
        ("first", Value::from("John")),
        ("last", Value::from("Smith")),
    ]);
    assert_eq!(evaluate_expression("rate*4", &known), Value::Float(2.0));
    assert_eq!(evaluate_expression("first+last", &known), Value::from("JohnSmith"));
    assert_eq!(evaluate_expression("first", &known), Value::from("John"));
}

#[test]
fn test_names_with_underscores_resolve() {
    let known = vars(vec![("base_rate", Value::Integer(7))]);
    assert_eq!(evaluate_expression("base_rate*2", &known), Value::Integer(14));
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_literal_numbers() {
    assert_eq!(eval("42"), Value::Integer(42));
    assert_eq!(eval("-42"), Value::Integer(-42));
    assert_eq!(eval("3.5"), Value::Float(3.5));
    assert_eq!(eval("1e3"), Value::Float(1000.0));
}

#[test]
fn test_division_rules() {
    assert_eq!(eval("6/3"), Value::Float(2.0));
    assert_eq!(eval("7//2"), Value::Integer(3));
    assert_eq!(eval("-7//2"), Value::Integer(-4));
    assert_eq!(eval("-7%3"), Value::Integer(2));
    assert_eq!(eval("7.5//2"), Value::Float(3.0));
}

#[test]
fn test_power() {
    assert_eq!(eval("2**10"), Value::Integer(1024));
    assert_eq!(eval("-2**2"), Value::Integer(-4));
    assert_eq!(eval("2**3**2"), Value::Integer(512));
    assert_eq!(eval("2**-1"), Value::Float(0.5));
}

#[test]
fn test_precedence() {
    assert_eq!(eval("1+2*3"), Value::Integer(7));
    assert_eq!(eval("(1+2)*3"), Value::Integer(9));
    assert_eq!(eval("10-4-3"), Value::Integer(3));
}

#[test]
fn test_mixed_integer_float() {
    assert_eq!(eval("1+2.5"), Value::Float(3.5));
    assert_eq!(eval("1+2.0"), Value::Float(3.0));
    // Same float result whichever way the integer is written
    assert_eq!(eval("3*0.1"), Value::Float(0.30000000000000004));
    assert_eq!(eval("3*0.1"), eval("3.0*0.1"));
    assert_eq!(eval("1+0.1+0.2"), Value::Float(1.0 + 0.1 + 0.2));
}

#[test]
fn test_wide_integers() {
    assert_eq!(eval("12345678901234567890"), Value::Integer(12_345_678_901_234_567_890));
    assert_eq!(eval("9223372036854775807+1"), Value::Integer(9_223_372_036_854_775_808));
    assert_eq!(eval("2**100"), Value::Integer(1 << 100));
}

#[test]
fn test_powers_of_unit_bases() {
    assert_eq!(eval("1**5000000000"), Value::Integer(1));
    assert_eq!(eval("0**5000000000"), Value::Integer(0));
    assert_eq!(eval("(-1)**5000000001"), Value::Integer(-1));
    assert_eq!(eval("2**5000000000"), Value::from("2**5000000000"));
}

#[test]
fn test_quoted_strings_evaluate_to_text() {
    assert_eq!(eval("'hello'"), Value::from("hello"));
    assert_eq!(eval("\"hello\""), Value::from("hello"));
    assert_eq!(eval("'ab'*3"), Value::from("ababab"));
}

// ============================================================================
// Fallback to the original text
// ============================================================================

#[test]
fn test_plain_words_fall_back() {
    assert_eq!(eval("hello"), Value::from("hello"));
    assert_eq!(eval("hello world"), Value::from("hello world"));
    assert_eq!(eval("True"), Value::from("True"));
    assert_eq!(eval(""), Value::from(""));
}

#[test]
fn test_undefined_variable_falls_back() {
    let known = vars(vec![("a", Value::Integer(1))]);
    assert_eq!(evaluate_expression("a+b", &known), Value::from("a+b"));
    assert_eq!(
        try_evaluate("a+b", &known),
        Err(ExpressionError::Eval(EvalError::UndefinedVariable("b".into())))
    );
}

#[test]
fn test_runtime_errors_fall_back() {
    assert_eq!(eval("1/0"), Value::from("1/0"));
    assert_eq!(eval("5%0"), Value::from("5%0"));
    assert_eq!(eval("0**-1"), Value::from("0**-1"));
    assert_eq!(eval("'a'-1"), Value::from("'a'-1"));
    let past_i128 = "170141183460469231731687303715884105727+1";
    assert_eq!(eval(past_i128), Value::from(past_i128));
}

#[test]
fn test_containers_stay_opaque() {
    for literal in ["[1, 2, 3]", "(1, 2)", "{'a': 1}", "()", "[]"] {
        assert_eq!(eval(literal), Value::from(literal), "Failed for input: {}", literal);
    }

    let known = vars(vec![("a", Value::Integer(1))]);
    assert_eq!(evaluate_expression("[a]", &known), Value::from("[a]"));
}

#[test]
fn test_other_text_falls_back() {
    assert_eq!(eval("http://example.com"), Value::from("http://example.com"));
    assert_eq!(eval("1.2.3"), Value::from("1.2.3"));
    assert_eq!(eval("2024-01-15"), Value::from("2024-01-15"));
    assert_eq!(eval("v1"), Value::from("v1"));
}

// ============================================================================
// Oversized input
// ============================================================================

#[test]
fn test_deep_parentheses_fall_back() {
    let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(eval(&shallow), Value::Integer(1));

    let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_eq!(eval(&deep), Value::from(deep.as_str()));
}

#[test]
fn test_long_operator_chains_fall_back() {
    let sum = vec!["1"; 20_000].join("+");
    assert_eq!(eval(&sum), Value::from(sum.as_str()));

    let signs = format!("{}1", "-".repeat(20_000));
    assert_eq!(eval(&signs), Value::from(signs.as_str()));

    assert_eq!(eval(&vec!["1"; 50].join("+")), Value::Integer(50));
}

#[test]
fn test_huge_repetition_falls_back() {
    for expr in ["'ab'*9223372036854775807", "'ab'*99999999999999", "9223372036854775807*'ab'"] {
        assert_eq!(eval(expr), Value::from(expr), "Failed for input: {}", expr);
    }
    assert_eq!(eval("''*99999999999999"), Value::from(""));
}

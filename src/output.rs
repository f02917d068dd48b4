//! Writing stores back out: flat `name=value` lines, and JSON.
//!
//! # Examples
//!
//! ```
//! use varhandler::{Store, Value};
//! use varhandler::output::{render_lines, to_json};
//!
//! let store: Store = [("a", Value::Integer(1)), ("b", Value::from("x"))]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(render_lines(&store, ":"), "a:1\nb:x\n");
//! assert_eq!(to_json(&store).unwrap(), r#"{"a":1,"b":"x"}"#);
//! ```

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{error::Result, store::Store, value::Value};

/// One output line, newline included.
pub fn format_line(name: &str, value: &Value, delimiter: &str) -> String {
    format!("{}{}{}\n", name, delimiter, value)
}

/// Every entry of `store` as one line, in store order.
pub fn render_lines(store: &Store, delimiter: &str) -> String {
    store
        .iter()
        .map(|(name, value)| format_line(name, value, delimiter))
        .collect()
}

/// Appends `.txt` to a destination path that contains no `.` at all.
///
/// The whole path is checked, so `./out` and `conf.d/out` are left alone.
pub fn destination_path(dest: &Path) -> PathBuf {
    if dest.to_string_lossy().contains('.') {
        return dest.to_path_buf();
    }
    let mut name = OsString::from(dest.as_os_str());
    name.push(".txt");
    PathBuf::from(name)
}

/// Convert a Value to serde_json::Value
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(n) => i64::try_from(*n)
            .map(serde_json::Number::from)
            .or_else(|_| u64::try_from(*n).map(serde_json::Number::from))
            .ok()
            .or_else(|| serde_json::Number::from_f64(*n as f64))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

/// Convert a Store to a JSON object with keys in store order
pub fn store_to_json(store: &Store) -> serde_json::Value {
    serde_json::Value::Object(
        store
            .iter()
            .map(|(name, value)| (name.to_string(), value_to_json(value)))
            .collect(),
    )
}

/// Compact JSON object text
pub fn to_json(store: &Store) -> Result<String> {
    Ok(serde_json::to_string(&store_to_json(store))?)
}

/// JSON object text with 2-space indentation
pub fn to_json_pretty(store: &Store) -> Result<String> {
    Ok(serde_json::to_string_pretty(&store_to_json(store))?)
}

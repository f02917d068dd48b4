use std::{collections::HashMap, fs, io, path::Path};

use crate::{interpret::Interpretation, line::parse_line, value::Value};

/// Ordered mapping of variable name to interpreted value.
///
/// Entries keep the order in which their names first appeared. Inserting an
/// existing name replaces its value in place, so a file that redefines a
/// variable further down keeps the variable at its original position with
/// the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from in-memory text.
    ///
    /// Lines are separated by `\n`, `\r\n` or a lone `\r`. Each value is
    /// interpreted against the variables defined on the lines above it.
    ///
    /// ```
    /// use varhandler::{Interpretation, Store, Value};
    ///
    /// let text = "a=1\nb=2\ntotal=a+b\n";
    /// let store = Store::parse(text, "=", Interpretation::EvaluateExpression);
    /// assert_eq!(store.get("total"), Some(&Value::Integer(3)));
    ///
    /// let store = Store::parse(text, "=", Interpretation::PreserveLiteral);
    /// assert_eq!(store.get("total"), Some(&Value::from("a+b")));
    /// ```
    pub fn parse(text: &str, delimiter: &str, interpretation: Interpretation) -> Self {
        let mut store = Store::new();

        for line in text.split(['\n', '\r']) {
            let Some((name, raw)) = parse_line(line, delimiter) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let value = interpretation.interpret(raw, &store);
            store.insert(name, value);
        }

        store
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Keeps only the entries for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) {
        self.entries.retain(|(name, value)| keep(name, value));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
    }
}

impl IntoIterator for Store {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = Store::new();
        for (name, value) in iter {
            store.insert(name, value);
        }
        store
    }
}

/// Reads `path` in full and builds a store from its lines.
///
/// The file is opened, read and closed before this returns. A missing file
/// surfaces as an [`io::Error`] of kind `NotFound`.
pub fn load_variables(
    path: impl AsRef<Path>,
    delimiter: &str,
    interpretation: Interpretation,
) -> io::Result<Store> {
    let text = fs::read_to_string(path)?;
    Ok(Store::parse(&text, delimiter, interpretation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redefinition_keeps_first_position() {
        let store = Store::parse("a=1\nb=2\na=3\n", "=", Interpretation::EvaluateExpression);
        let entries: Vec<_> = store.iter().collect();
        assert_eq!(
            entries,
            vec![("a", &Value::Integer(3)), ("b", &Value::Integer(2))]
        );
    }

    #[test]
    fn mixed_line_endings_and_blank_lines() {
        let store = Store::parse("a=1\r\nb=2\rc=3\n\n\n", "=", Interpretation::PreserveLiteral);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn skips_malformed_and_nameless_lines() {
        let text = "# comment\nx=1=2\n=5\nok=yes\n";
        let store = Store::parse(text, "=", Interpretation::PreserveLiteral);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ok"), Some(&Value::from("yes")));
    }

    #[test]
    fn retain_rebuilds_lookup() {
        let mut store: Store = [("a", Value::Integer(1)), ("b", Value::Integer(2)), ("c", Value::Integer(3))]
            .into_iter()
            .collect();
        store.retain(|name, _| name != "a");
        assert_eq!(store.get("c"), Some(&Value::Integer(3)));
        assert!(!store.contains_key("a"));
        assert_eq!(store.len(), 2);
    }
}

//! File operations over `name=value` text files.
//!
//! Every call reads the source file from scratch (and writes the destination
//! in full) before returning; nothing is cached between calls, so a [`search`]
//! right after a [`save`] to the same path sees the new content.
//!
//! # Concurrency
//!
//! There is no locking. Two processes or threads writing the same file race,
//! and a reader running alongside a writer may see a truncated file. Callers
//! that share files must coordinate access themselves.
//!
//! # Examples
//!
//! ```no_run
//! use varhandler::{Datatype, Options, ops};
//!
//! let vars = ops::get("settings.txt", &Options::default())?;
//! let ints = ops::get("settings.txt", &Options::default().with_datatype(Datatype::Integer))?;
//! let line = ops::search("settings.txt", "width", &Options::default().with_delimiter(": "))?;
//! ops::save("settings.txt", "numbers", &Options::default().with_datatype(Datatype::Integer))?;
//! # Ok::<(), varhandler::VarError>(())
//! ```

use std::{fs, path::Path};

use crate::{
    error::{Result, VarError},
    filter::{Datatype, filter_store},
    interpret::Interpretation,
    line::parse_line,
    output::{destination_path, format_line, render_lines},
    store::{Store, load_variables},
    value::Value,
};

/// Per-call settings. The defaults match the usual `name=value` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Keep only values of this kind
    pub datatype: Option<Datatype>,
    /// Separator written between name and value
    pub delimiter: String,
    /// Separator used to split lines when reading
    pub parse_delimiter: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            datatype: None,
            delimiter: "=".to_string(),
            parse_delimiter: "=".to_string(),
        }
    }
}

impl Options {
    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = Some(datatype);
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_parse_delimiter(mut self, parse_delimiter: impl Into<String>) -> Self {
        self.parse_delimiter = parse_delimiter.into();
        self
    }

    fn parse_delimiter(&self) -> Result<&str> {
        if self.parse_delimiter.is_empty() {
            return Err(VarError::EmptyDelimiter);
        }
        Ok(&self.parse_delimiter)
    }
}

fn read_store(file: &Path, options: &Options, interpretation: Interpretation) -> Result<Store> {
    let delimiter = options.parse_delimiter()?;
    Ok(load_variables(file, delimiter, interpretation)?)
}

fn lookup(file: &Path, name: &str, options: &Options) -> Result<Value> {
    let store = read_store(file, options, Interpretation::EvaluateExpression)?;
    store
        .get(name)
        .cloned()
        .ok_or_else(|| VarError::VariableNotFound(name.to_string()))
}

/// Reads `file` keeping values as text (single quotes stripped), optionally
/// filtered by `options.datatype`.
pub fn load(file: impl AsRef<Path>, options: &Options) -> Result<Store> {
    let interpretation = Interpretation::PreserveLiteral;
    let store = read_store(file.as_ref(), options, interpretation)?;
    Ok(filter_store(store, options.datatype, interpretation))
}

/// Reads `file` evaluating each value as an arithmetic expression over the
/// variables above it, optionally filtered by `options.datatype`.
pub fn get(file: impl AsRef<Path>, options: &Options) -> Result<Store> {
    let interpretation = Interpretation::EvaluateExpression;
    let store = read_store(file.as_ref(), options, interpretation)?;
    Ok(filter_store(store, options.datatype, interpretation))
}

/// Writes the evaluated (and optionally filtered) variables of `file` to
/// `dest`, one `name<delimiter>value` line each, replacing its content.
/// A `dest` without any `.` gets `.txt` appended.
pub fn save(file: impl AsRef<Path>, dest: impl AsRef<Path>, options: &Options) -> Result<()> {
    let store = get(file, options)?;
    let dest = destination_path(dest.as_ref());
    fs::write(dest, render_lines(&store, &options.delimiter))?;
    Ok(())
}

/// Finds `name` among the evaluated variables and formats it as
/// `name<delimiter>value`.
pub fn search(file: impl AsRef<Path>, name: &str, options: &Options) -> Result<String> {
    let value = lookup(file.as_ref(), name, options)?;
    Ok(format!("{}{}{}", name, options.delimiter, value))
}

/// Returns the value text of the first line defining `name`, exactly as
/// written (trimmed, quotes kept), without interpreting any line.
pub fn load_search(file: impl AsRef<Path>, name: &str, options: &Options) -> Result<String> {
    let delimiter = options.parse_delimiter()?;
    let text = fs::read_to_string(file)?;

    text.split(['\n', '\r'])
        .filter_map(|line| parse_line(line, delimiter))
        .find(|(n, _)| !n.is_empty() && *n == name)
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| VarError::VariableNotFound(name.to_string()))
}

/// The evaluated value of `name`.
pub fn value_of(file: impl AsRef<Path>, name: &str, options: &Options) -> Result<Value> {
    lookup(file.as_ref(), name, options)
}

/// Whether `file` defines `name`. The whole file is read and evaluated; a
/// missing file is an error, not `false`.
pub fn exists(file: impl AsRef<Path>, name: &str, options: &Options) -> Result<bool> {
    let store = read_store(file.as_ref(), options, Interpretation::EvaluateExpression)?;
    Ok(store.contains_key(name))
}

/// Writes the single line for `name` to `dest`, replacing its content, and
/// returns the value. `dest` is not touched when `name` is undefined.
pub fn save_search(
    file: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    name: &str,
    options: &Options,
) -> Result<Value> {
    let value = lookup(file.as_ref(), name, options)?;
    let dest = destination_path(dest.as_ref());
    fs::write(dest, format_line(name, &value, &options.delimiter))?;
    Ok(value)
}

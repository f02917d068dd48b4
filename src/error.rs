use std::{fmt, io};

/// Errors returned by the file operations.
#[derive(Debug)]
pub enum VarError {
    /// Reading or writing a file failed; a missing source file has kind
    /// [`io::ErrorKind::NotFound`]
    Io(io::Error),
    /// The requested variable is not defined in the file
    VariableNotFound(String),
    /// The parse delimiter is the empty string
    EmptyDelimiter,
    /// A datatype name that [`Datatype`](crate::Datatype) does not know
    UnknownDatatype(String),
    /// JSON export failed
    Json(serde_json::Error),
}

impl VarError {
    /// True when the source file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, VarError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarError::Io(e) => write!(f, "IO error: {}", e),
            VarError::VariableNotFound(name) => {
                write!(f, "Variable '{}' not found in the loaded file.", name)
            }
            VarError::EmptyDelimiter => write!(f, "Delimiter must not be empty"),
            VarError::UnknownDatatype(name) => write!(
                f,
                "Unknown datatype: '{}' (expected str, int, float, list, tuple or dict)",
                name
            ),
            VarError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for VarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VarError::Io(e) => Some(e),
            VarError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VarError {
    fn from(e: io::Error) -> Self {
        VarError::Io(e)
    }
}

impl From<serde_json::Error> for VarError {
    fn from(e: serde_json::Error) -> Self {
        VarError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, VarError>;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaErrorKind {
    #[error("extra keys not allowed")]
    UnknownKey,
    #[error("required key not provided")]
    MissingKey,
    #[error("expected {0}")]
    WrongType(&'static str),
    #[error("unknown value '{value}', valid options are {options}")]
    UnknownOption { value: String, options: String },
    #[error("{0}")]
    Invalid(String),
}

/// Validation failure, located by the path of keys leading to the bad value
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[{}] {kind}", .path.join(" -> "))]
pub struct SchemaError {
    pub path: Vec<String>,
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    pub fn new(key: impl Into<String>, kind: SchemaErrorKind) -> Self {
        SchemaError {
            path: vec![key.into()],
            kind,
        }
    }

    /// Error about the record as a whole rather than one of its keys
    pub fn root(kind: SchemaErrorKind) -> Self {
        SchemaError {
            path: Vec::new(),
            kind,
        }
    }

    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::new(key, SchemaErrorKind::Invalid(message.into()))
    }

    /// Prefix the path with the key of the enclosing record
    pub fn within(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, key.into());
        self
    }

    /// Top-level key the error refers to
    pub fn key(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

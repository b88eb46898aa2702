use crate::config::ConfigError;
use crate::player::ValidationError;
use crate::store::StoreError;
use crate::xml::XmlError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure classes reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input; shown next to the offending field
    Validation,
    /// Stale reference to a record that no longer exists
    NotFound,
    /// Database or file unavailable
    Storage,
    /// Malformed import file; nothing was written
    XmlFormat,
    /// Invalid page size, page number or filter
    Configuration,
}

impl ErrorKind {
    /// Process exit code used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Validation => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Storage => 4,
            ErrorKind::XmlFormat => 5,
            ErrorKind::Configuration => 6,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "Validation error",
            ErrorKind::NotFound => "Not found",
            ErrorKind::Storage => "Storage error",
            ErrorKind::XmlFormat => "XML format error",
            ErrorKind::Configuration => "Configuration error",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::Store(StoreError::Sqlite(_)) => ErrorKind::Storage,
            RosterError::Store(StoreError::NotFound { .. }) => ErrorKind::NotFound,
            RosterError::Store(_) => ErrorKind::Configuration,
            RosterError::Xml(err) if err.is_io() => ErrorKind::Storage,
            RosterError::Xml(XmlError::Write(_)) => ErrorKind::Storage,
            RosterError::Xml(_) => ErrorKind::XmlFormat,
            RosterError::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Single-line message suitable for a dialog or terminal
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Storage => format!("{}: {} (nothing was changed)", self.kind(), self),
            ErrorKind::XmlFormat => format!("{}: {} (nothing was imported)", self.kind(), self),
            kind => format!("{}: {}", kind, self),
        }
    }
}

/// What crosses the boundary to the caller: a classified, human-readable
/// message and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UserError {}

impl From<RosterError> for UserError {
    fn from(err: RosterError) -> Self {
        Self { kind: err.kind(), message: err.user_message() }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

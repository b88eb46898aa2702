use crate::models::PlayerField;
use crate::player::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("Document has no <players> root element")]
    MissingRoot,

    #[error("Expected root element <players>, found <{name}>")]
    UnexpectedRoot { name: String },

    #[error("Unexpected element <{name}> inside <players> (after player #{after})")]
    UnexpectedElement { name: String, after: usize },

    #[error("Unexpected element <{name}> after </players>")]
    TrailingElement { name: String },

    #[error("Unexpected text '{text}' outside a player field")]
    StrayText { text: String },

    #[error("Player #{index}: unknown element <{name}>")]
    UnknownField { index: usize, name: String },

    #[error("Player #{index}: element <{}> appears more than once", .field.key())]
    DuplicateField { index: usize, field: PlayerField },

    #[error("Player #{index}: element <{}> must contain only text", .field.key())]
    NestedElement { index: usize, field: PlayerField },

    #[error("Player #{index}: missing element <{}>", .field.key())]
    MissingField { index: usize, field: PlayerField },

    #[error("Player #{index}: {source}")]
    InvalidPlayer { index: usize, source: ValidationError },

    #[error("Failed to write XML: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlError {
    /// 1-based index of the offending `<player>` element, when there is one
    pub fn player_index(&self) -> Option<usize> {
        match self {
            XmlError::UnknownField { index, .. }
            | XmlError::DuplicateField { index, .. }
            | XmlError::NestedElement { index, .. }
            | XmlError::MissingField { index, .. }
            | XmlError::InvalidPlayer { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// File access failed, as opposed to the content being malformed
    pub fn is_io(&self) -> bool {
        matches!(self, XmlError::Io(_))
    }
}

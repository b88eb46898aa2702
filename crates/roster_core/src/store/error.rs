use crate::models::PlayerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Player {id} not found")]
    NotFound { id: PlayerId },

    #[error("Filter must constrain at least one field")]
    EmptyFilter,

    #[error("Invalid birth date in filter: '{value}' (expected YYYY-MM-DD)")]
    InvalidFilterDate { value: String },

    #[error("Invalid page size {size}: allowed sizes are {allowed:?}")]
    InvalidPageSize { size: u32, allowed: Vec<u32> },

    #[error("Invalid page {page}: pages start at 1")]
    InvalidPage { page: u32 },
}

impl StoreError {
    /// True for errors caused by the request rather than the storage medium
    pub fn is_request_error(&self) -> bool {
        !matches!(self, StoreError::Sqlite(_))
    }
}

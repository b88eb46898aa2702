// Player persistence
// One SQLite table keyed by an auto-assigned identity column

pub mod error;
pub mod filter;
pub mod pagination;
pub mod repository;
pub mod schema;

pub use error::StoreError;
pub use filter::{PlayerFilter, RawFilter};
pub use pagination::{LimitOffset, Page, PageRequest, DEFAULT_PAGE_SIZES};
pub use repository::PlayerRepository;

//! # roster_core - Football Player Roster
//!
//! Keeps a roster of football players in a single SQLite table and moves it
//! in and out of a fixed XML format.
//!
//! ## Features
//! - Field validation with per-field error messages
//! - Criteria search with exact-match filters and page-based results
//! - Delete by id or by criteria
//! - All-or-nothing XML import, atomic XML export
//! - One controller that turns every failure into a classified user message

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod player;
pub mod store;
pub mod xml;

pub use config::{ConfigError, RosterConfig, CONFIG_PATH_ENV};
pub use controller::PlayerController;
pub use error::{ErrorKind, Result, RosterError, UserError};

// Re-export player types
pub use models::{Player, PlayerField, PlayerId, RawPlayer, StoredPlayer};
pub use player::{PlayerValidator, ValidationError, ValidationRules};

// Re-export store types
pub use store::{Page, PageRequest, PlayerFilter, PlayerRepository, RawFilter, StoreError};

// Re-export XML codec
pub use xml::{decode_players, encode_players, XmlError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

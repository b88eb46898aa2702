//! Player validation
//!
//! The rules a player record must satisfy before it is stored, searched or
//! exported.

pub mod validation;

pub use validation::{PlayerValidator, ValidationError, ValidationRules, DEFAULT_MIN_BIRTH_YEAR};

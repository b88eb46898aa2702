pub mod player;

pub use player::{Player, PlayerField, PlayerId, RawPlayer, StoredPlayer, DATE_FORMAT};

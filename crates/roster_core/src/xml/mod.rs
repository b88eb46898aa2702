// XML import/export
// Fixed schema: <players> root, <player> records, six text children each

pub mod codec;
pub mod error;
pub mod file;

pub use codec::{decode_players, encode_players, PLAYER_TAG, ROOT_TAG};
pub use error::XmlError;
pub use file::{read_players_file, write_players_file};

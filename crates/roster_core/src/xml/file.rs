use super::codec::{decode_players, encode_players};
use super::error::XmlError;
use crate::models::Player;
use crate::player::ValidationRules;

use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `players` to `path`. Returns the number of records written.
///
/// The document goes to a uniquely named temporary file in the target
/// directory and is renamed into place, so a failed export never leaves a
/// truncated file behind and never touches neighbouring files.
pub fn write_players_file(path: &Path, players: &[Player]) -> Result<usize, XmlError> {
    let document = encode_players(players)?;

    let parent = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(document.as_bytes())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    // Dropping the unpersisted temp file removes it
    temp.persist(path).map_err(|err| err.error)?;

    debug!("Wrote {} players ({} bytes) to {:?}", players.len(), document.len(), path);
    Ok(players.len())
}

/// Read and validate every player in the file at `path`
pub fn read_players_file(
    path: &Path,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<Vec<Player>, XmlError> {
    let bytes = fs::read(path)?;
    let document = String::from_utf8(bytes).map_err(|err| XmlError::Syntax {
        position: err.utf8_error().valid_up_to() as u64,
        message: "document is not valid UTF-8".to_string(),
    })?;

    let players = decode_players(&document, rules, today)?;
    debug!("Read {} players from {:?}", players.len(), path);
    Ok(players)
}

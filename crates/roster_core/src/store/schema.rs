use rusqlite::Connection;

pub const PLAYERS_TABLE: &str = "players";

/// Columns selected for a full row, identity first
pub const PLAYER_COLUMNS: &str = "id, full_name, birth_date, team, home_city, squad, position";

const CREATE_PLAYERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        team TEXT NOT NULL,
        home_city TEXT NOT NULL,
        squad TEXT NOT NULL,
        position TEXT NOT NULL
    );
";

/// Create the schema if it does not exist yet. Safe to call on every open.
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_PLAYERS_TABLE)
}

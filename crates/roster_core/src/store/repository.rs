use super::error::StoreError;
use super::filter::PlayerFilter;
use super::pagination::{Page, PageRequest};
use super::schema::{self, PLAYER_COLUMNS};
use crate::models::{Player, PlayerId, StoredPlayer};

use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info};

const INSERT_PLAYER: &str = "
    INSERT INTO players (full_name, birth_date, team, home_city, squad, position)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const UPDATE_PLAYER: &str = "
    UPDATE players
    SET full_name = ?1, birth_date = ?2, team = ?3, home_city = ?4, squad = ?5, position = ?6
    WHERE id = ?7
";

/// Single-table player store over one SQLite connection.
pub struct PlayerRepository {
    conn: Connection,
}

impl PlayerRepository {
    /// Open (creating if needed) the database file and bootstrap the schema
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        debug!("Opened player database at {:?}", path);
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn insert(&self, player: &Player) -> Result<PlayerId, StoreError> {
        let id = insert_row(&self.conn, player)?;
        debug!("Inserted player {} ({})", id, player.full_name());
        Ok(id)
    }

    /// Insert every player or none of them
    pub fn insert_all(&mut self, players: &[Player]) -> Result<Vec<PlayerId>, StoreError> {
        let tx = self.conn.transaction()?;
        let ids = players.iter().map(|p| insert_row(&tx, p)).collect::<Result<Vec<_>, _>>()?;
        tx.commit()?;

        info!("Inserted {} players", ids.len());
        Ok(ids)
    }

    /// Replace the whole table contents with `players`, atomically
    pub fn replace_all(&mut self, players: &[Player]) -> Result<Vec<PlayerId>, StoreError> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM players", [])?;
        let ids = players.iter().map(|p| insert_row(&tx, p)).collect::<Result<Vec<_>, _>>()?;
        tx.commit()?;

        info!("Replaced {} players with {}", removed, ids.len());
        Ok(ids)
    }

    pub fn get(&self, id: PlayerId) -> Result<Option<StoredPlayer>, StoreError> {
        let player = self
            .conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1"),
                [id.0],
                stored_player_from_row,
            )
            .optional()?;
        Ok(player)
    }

    pub fn update(&self, id: PlayerId, player: &Player) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            UPDATE_PLAYER,
            params![
                player.full_name(),
                player.birth_date_iso(),
                player.team(),
                player.home_city(),
                player.squad(),
                player.position(),
                id.0,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!("Updated player {}", id);
        Ok(())
    }

    pub fn delete_by_id(&self, id: PlayerId) -> Result<(), StoreError> {
        let changed = self.conn.execute("DELETE FROM players WHERE id = ?1", [id.0])?;
        if changed == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!("Deleted player {}", id);
        Ok(())
    }

    /// Delete every row matching `filter`; returns the number removed.
    ///
    /// An empty filter is rejected rather than treated as "delete all".
    pub fn delete_by_criteria(&self, filter: &PlayerFilter) -> Result<usize, StoreError> {
        if filter.is_empty() {
            return Err(StoreError::EmptyFilter);
        }

        let (clause, values) = filter.where_clause();
        let removed =
            self.conn.execute(&format!("DELETE FROM players{clause}"), params_from_iter(values))?;

        debug!("Deleted {} players matching {:?}", removed, filter);
        Ok(removed)
    }

    /// One page of matches ordered by id, with the total match count
    pub fn search(
        &self,
        filter: &PlayerFilter,
        request: PageRequest,
    ) -> Result<Page<StoredPlayer>, StoreError> {
        let (clause, mut values) = filter.where_clause();

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM players{clause}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let window = request.limit_offset();
        let limit_index = values.len() + 1;
        values.push(Value::Integer(window.limit));
        values.push(Value::Integer(window.offset));

        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players{clause} ORDER BY id ASC LIMIT ?{} OFFSET ?{}",
            limit_index,
            limit_index + 1
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params_from_iter(values.iter()), stored_player_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: total as usize,
            page: request.page(),
            page_size: request.page_size(),
        })
    }

    pub fn list_all(&self) -> Result<Vec<StoredPlayer>, StoreError> {
        let mut stmt =
            self.conn.prepare(&format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id ASC"))?;
        let players =
            stmt.query_map([], stored_player_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn insert_row(conn: &Connection, player: &Player) -> Result<PlayerId, StoreError> {
    conn.execute(
        INSERT_PLAYER,
        params![
            player.full_name(),
            player.birth_date_iso(),
            player.team(),
            player.home_city(),
            player.squad(),
            player.position(),
        ],
    )?;
    Ok(PlayerId(conn.last_insert_rowid()))
}

fn stored_player_from_row(row: &Row) -> rusqlite::Result<StoredPlayer> {
    Ok(StoredPlayer {
        id: PlayerId(row.get("id")?),
        player: Player::from_parts(
            row.get("full_name")?,
            row.get("birth_date")?,
            row.get("team")?,
            row.get("home_city")?,
            row.get("squad")?,
            row.get("position")?,
        ),
    })
}

//! Roster controller
//!
//! The narrow interface a front end (desktop form, CLI) calls. Each method
//! validates its input, calls the store and/or the XML codec, and turns any
//! failure into a single [`UserError`]; nothing internal crosses this
//! boundary.

use crate::config::RosterConfig;
use crate::error::{RosterError, UserError};
use crate::models::{Player, PlayerId, RawPlayer, StoredPlayer};
use crate::player::PlayerValidator;
use crate::store::{Page, PageRequest, PlayerFilter, PlayerRepository, RawFilter, StoreError};
use crate::xml::{read_players_file, write_players_file};

use chrono::NaiveDate;
use std::path::Path;
use tracing::{info, warn};

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct PlayerController {
    repo: PlayerRepository,
    config: RosterConfig,
    today: fn() -> NaiveDate,
}

impl PlayerController {
    pub fn new(repo: PlayerRepository, config: RosterConfig) -> Self {
        Self { repo, config, today: local_today }
    }

    /// Open the database named in `config` and build a controller over it
    pub fn open(config: RosterConfig) -> Result<Self, UserError> {
        let repo = PlayerRepository::open(&config.database_path)
            .map_err(|err| UserError::from(RosterError::from(err)))?;
        Ok(Self::new(repo, config))
    }

    /// Replace the clock used for the "birth date not in the future" rule
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn repository(&self) -> &PlayerRepository {
        &self.repo
    }

    pub fn add_player(&mut self, raw: &RawPlayer) -> Result<StoredPlayer, UserError> {
        let result = self.validate(raw).and_then(|player| {
            let id = self.repo.insert(&player)?;
            Ok(StoredPlayer { id, player })
        });

        self.finish("add_player", result).inspect(|stored| {
            info!(id = %stored.id, name = stored.player.full_name(), "Player added");
        })
    }

    pub fn update_player(
        &mut self,
        id: PlayerId,
        raw: &RawPlayer,
    ) -> Result<StoredPlayer, UserError> {
        let result = self.validate(raw).and_then(|player| {
            self.repo.update(id, &player)?;
            Ok(StoredPlayer { id, player })
        });

        self.finish("update_player", result).inspect(|stored| {
            info!(id = %stored.id, "Player updated");
        })
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), UserError> {
        let result = self.repo.delete_by_id(id).map_err(RosterError::from);
        self.finish("remove_player", result).inspect(|()| info!(%id, "Player removed"))
    }

    /// Delete every player matching the criteria; returns how many went
    pub fn remove_players(&mut self, criteria: &RawFilter) -> Result<usize, UserError> {
        let result = PlayerFilter::from_raw(criteria)
            .and_then(|filter| self.repo.delete_by_criteria(&filter))
            .map_err(RosterError::from);

        self.finish("remove_players", result).inspect(|count| {
            info!(count, "Players removed by criteria");
        })
    }

    /// One page of matching players plus the total for the pager
    pub fn search_players(
        &self,
        criteria: &RawFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<StoredPlayer>, UserError> {
        let result = PageRequest::new(page, page_size, &self.config.page_sizes)
            .and_then(|request| {
                let filter = PlayerFilter::from_raw(criteria)?;
                self.repo.search(&filter, request)
            })
            .map_err(RosterError::from);

        self.finish("search_players", result)
    }

    pub fn list_players(&self) -> Result<Vec<StoredPlayer>, UserError> {
        let result = self.repo.list_all().map_err(RosterError::from);
        self.finish("list_players", result)
    }

    /// Export the whole roster; returns the number of records written
    pub fn export_all(&self, path: &Path) -> Result<usize, UserError> {
        let result = self.repo.list_all().map_err(RosterError::from).and_then(|stored| {
            let players: Vec<Player> = stored.into_iter().map(|s| s.player).collect();
            Ok(write_players_file(path, &players)?)
        });

        self.finish("export_all", result).inspect(|count| {
            info!(count, path = %path.display(), "Roster exported");
        })
    }

    /// Export the given players, in the given order. Unknown ids abort the
    /// export before anything is written.
    pub fn export_selected(&self, path: &Path, ids: &[PlayerId]) -> Result<usize, UserError> {
        let result = ids
            .iter()
            .map(|id| match self.repo.get(*id) {
                Ok(Some(stored)) => Ok(stored.player),
                Ok(None) => Err(StoreError::NotFound { id: *id }.into()),
                Err(err) => Err(RosterError::from(err)),
            })
            .collect::<Result<Vec<Player>, RosterError>>()
            .and_then(|players| Ok(write_players_file(path, &players)?));

        self.finish("export_selected", result).inspect(|count| {
            info!(count, path = %path.display(), "Selected players exported");
        })
    }

    /// Append every player in the file. One bad record rejects the batch.
    pub fn import_all(&mut self, path: &Path) -> Result<Vec<PlayerId>, UserError> {
        let result = self.read_file(path).and_then(|players| Ok(self.repo.insert_all(&players)?));

        self.finish("import_all", result).inspect(|ids| {
            info!(count = ids.len(), path = %path.display(), "Players imported");
        })
    }

    /// Replace the roster with the file's contents, same all-or-nothing rule
    pub fn load_database(&mut self, path: &Path) -> Result<Vec<PlayerId>, UserError> {
        let result = self.read_file(path).and_then(|players| Ok(self.repo.replace_all(&players)?));

        self.finish("load_database", result).inspect(|ids| {
            info!(count = ids.len(), path = %path.display(), "Roster loaded from XML");
        })
    }

    fn validate(&self, raw: &RawPlayer) -> Result<Player, RosterError> {
        Ok(PlayerValidator::validate(raw, &self.config.validation_rules(), (self.today)())?)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<Player>, RosterError> {
        Ok(read_players_file(path, &self.config.validation_rules(), (self.today)())?)
    }

    fn finish<T>(&self, operation: &str, result: Result<T, RosterError>) -> Result<T, UserError> {
        result.map_err(|err| {
            warn!(operation, kind = ?err.kind(), error = %err, "Operation failed");
            UserError::from(err)
        })
    }
}

#[cfg(test)]
pub mod tests;

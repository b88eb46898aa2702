use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for storage, XML exchange and display (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The six business fields of a player record, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerField {
    FullName,
    BirthDate,
    Team,
    HomeCity,
    Squad,
    Position,
}

impl PlayerField {
    /// All fields in canonical order (column order and XML child order)
    pub fn all() -> &'static [PlayerField] {
        &[
            PlayerField::FullName,
            PlayerField::BirthDate,
            PlayerField::Team,
            PlayerField::HomeCity,
            PlayerField::Squad,
            PlayerField::Position,
        ]
    }

    /// Column name in the `players` table and element name in the XML schema
    pub fn key(&self) -> &'static str {
        match self {
            PlayerField::FullName => "full_name",
            PlayerField::BirthDate => "birth_date",
            PlayerField::Team => "team",
            PlayerField::HomeCity => "home_city",
            PlayerField::Squad => "squad",
            PlayerField::Position => "position",
        }
    }

    /// Human-readable label for messages
    pub fn label(&self) -> &'static str {
        match self {
            PlayerField::FullName => "Full name",
            PlayerField::BirthDate => "Birth date",
            PlayerField::Team => "Team",
            PlayerField::HomeCity => "Home city",
            PlayerField::Squad => "Squad",
            PlayerField::Position => "Position",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.key() == key)
    }
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated player input, exactly as typed in a form or read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlayer {
    pub full_name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub team: String,
    pub home_city: String,
    pub squad: String,
    pub position: String,
}

impl RawPlayer {
    pub fn get(&self, field: PlayerField) -> &str {
        match field {
            PlayerField::FullName => &self.full_name,
            PlayerField::BirthDate => &self.birth_date,
            PlayerField::Team => &self.team,
            PlayerField::HomeCity => &self.home_city,
            PlayerField::Squad => &self.squad,
            PlayerField::Position => &self.position,
        }
    }

    pub fn set(&mut self, field: PlayerField, value: impl Into<String>) {
        let slot = match field {
            PlayerField::FullName => &mut self.full_name,
            PlayerField::BirthDate => &mut self.birth_date,
            PlayerField::Team => &mut self.team,
            PlayerField::HomeCity => &mut self.home_city,
            PlayerField::Squad => &mut self.squad,
            PlayerField::Position => &mut self.position,
        };
        *slot = value.into();
    }
}

impl From<&Player> for RawPlayer {
    fn from(player: &Player) -> Self {
        Self {
            full_name: player.full_name.clone(),
            birth_date: player.birth_date_iso(),
            team: player.team.clone(),
            home_city: player.home_city.clone(),
            squad: player.squad.clone(),
            position: player.position.clone(),
        }
    }
}

/// A validated player record.
///
/// Only [`PlayerValidator`](crate::player::PlayerValidator) and the store
/// (reading rows that were validated on the way in) construct this type, so
/// holding a `Player` means every field constraint holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    full_name: String,
    birth_date: NaiveDate,
    team: String,
    home_city: String,
    squad: String,
    position: String,
}

impl Player {
    pub(crate) fn from_parts(
        full_name: String,
        birth_date: NaiveDate,
        team: String,
        home_city: String,
        squad: String,
        position: String,
    ) -> Self {
        Self { full_name, birth_date, team, home_city, squad, position }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn home_city(&self) -> &str {
        &self.home_city
    }

    pub fn squad(&self) -> &str {
        &self.squad
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn birth_date_iso(&self) -> String {
        self.birth_date.format(DATE_FORMAT).to_string()
    }

    /// Field values as text, in canonical order
    pub fn field_values(&self) -> [(PlayerField, String); 6] {
        [
            (PlayerField::FullName, self.full_name.clone()),
            (PlayerField::BirthDate, self.birth_date_iso()),
            (PlayerField::Team, self.team.clone()),
            (PlayerField::HomeCity, self.home_city.clone()),
            (PlayerField::Squad, self.squad.clone()),
            (PlayerField::Position, self.position.clone()),
        ]
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {}",
            self.full_name,
            self.birth_date_iso(),
            self.team,
            self.home_city,
            self.squad,
            self.position
        )
    }
}

/// Store-assigned identity of a player row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player together with the identity the store gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredPlayer {
    pub id: PlayerId,
    #[serde(flatten)]
    pub player: Player,
}

impl fmt::Display for StoredPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.player)
    }
}

use super::error::StoreError;
use crate::models::{Player, PlayerField, DATE_FORMAT};
use chrono::NaiveDate;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Search/delete criteria as entered by the user: blank means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilter {
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub team: Option<String>,
    pub home_city: Option<String>,
    pub squad: Option<String>,
    pub position: Option<String>,
}

/// Conjunction of field equality constraints. Unset fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub team: Option<String>,
    pub home_city: Option<String>,
    pub squad: Option<String>,
    pub position: Option<String>,
}

fn normalize(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl PlayerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim every value, drop blanks and parse the birth date.
    pub fn from_raw(raw: &RawFilter) -> Result<Self, StoreError> {
        let birth_date = match normalize(&raw.birth_date) {
            Some(value) => Some(
                NaiveDate::parse_from_str(&value, DATE_FORMAT)
                    .map_err(|_| StoreError::InvalidFilterDate { value })?,
            ),
            None => None,
        };

        Ok(Self {
            full_name: normalize(&raw.full_name),
            birth_date,
            team: normalize(&raw.team),
            home_city: normalize(&raw.home_city),
            squad: normalize(&raw.squad),
            position: normalize(&raw.position),
        })
    }

    pub fn with_full_name(mut self, value: impl Into<String>) -> Self {
        self.full_name = Some(value.into());
        self
    }

    pub fn with_birth_date(mut self, value: NaiveDate) -> Self {
        self.birth_date = Some(value);
        self
    }

    pub fn with_team(mut self, value: impl Into<String>) -> Self {
        self.team = Some(value.into());
        self
    }

    pub fn with_home_city(mut self, value: impl Into<String>) -> Self {
        self.home_city = Some(value.into());
        self
    }

    pub fn with_squad(mut self, value: impl Into<String>) -> Self {
        self.squad = Some(value.into());
        self
    }

    pub fn with_position(mut self, value: impl Into<String>) -> Self {
        self.position = Some(value.into());
        self
    }

    /// The set constraints, in canonical field order
    pub fn constraints(&self) -> Vec<(PlayerField, String)> {
        let birth_date = self.birth_date.map(|date| date.format(DATE_FORMAT).to_string());
        [
            (PlayerField::FullName, self.full_name.clone()),
            (PlayerField::BirthDate, birth_date),
            (PlayerField::Team, self.team.clone()),
            (PlayerField::HomeCity, self.home_city.clone()),
            (PlayerField::Squad, self.squad.clone()),
            (PlayerField::Position, self.position.clone()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints().is_empty()
    }

    pub fn matches(&self, player: &Player) -> bool {
        let values = player.field_values();
        self.constraints().iter().all(|(field, expected)| {
            values.iter().any(|(candidate, actual)| candidate == field && actual == expected)
        })
    }

    /// `WHERE` clause (with a leading space, empty when unconstrained) and its
    /// positional parameters `?1..?n`.
    pub(crate) fn where_clause(&self) -> (String, Vec<Value>) {
        let constraints = self.constraints();
        if constraints.is_empty() {
            return (String::new(), Vec::new());
        }

        let predicates: Vec<String> = constraints
            .iter()
            .enumerate()
            .map(|(i, (field, _))| format!("{} = ?{}", field.key(), i + 1))
            .collect();
        let params = constraints.into_iter().map(|(_, value)| Value::Text(value)).collect();

        (format!(" WHERE {}", predicates.join(" AND ")), params)
    }
}

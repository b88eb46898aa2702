//! Validation module for player data
//!
//! Turns raw form or file input into a [`Player`], checking the field rules
//! in a fixed order and stopping at the first failure so the reported error
//! is deterministic.

use crate::models::{Player, PlayerField, RawPlayer, DATE_FORMAT};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest birth year accepted unless configured otherwise.
pub const DEFAULT_MIN_BIRTH_YEAR: i32 = 1900;

/// Text fields checked for emptiness, in check order.
const TEXT_FIELDS: [PlayerField; 5] = [
    PlayerField::FullName,
    PlayerField::Team,
    PlayerField::HomeCity,
    PlayerField::Squad,
    PlayerField::Position,
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(PlayerField),

    #[error("Birth date '{value}' is not a valid date (expected YYYY-MM-DD)")]
    UnparseableDate { value: String },

    #[error("Birth date {date} is in the future (today is {today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    #[error("Birth date {date} is before the earliest accepted year {min_year}")]
    DateTooEarly { date: NaiveDate, min_year: i32 },
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> PlayerField {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::UnparseableDate { .. }
            | ValidationError::FutureDate { .. }
            | ValidationError::DateTooEarly { .. } => PlayerField::BirthDate,
        }
    }
}

/// Tunable limits applied during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub min_birth_year: i32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { min_birth_year: DEFAULT_MIN_BIRTH_YEAR }
    }
}

/// Player validation utility
pub struct PlayerValidator;

impl PlayerValidator {
    /// Validate raw input and build a [`Player`] from the trimmed values.
    ///
    /// `today` is the reference date for the "not in the future" rule.
    pub fn validate(
        raw: &RawPlayer,
        rules: &ValidationRules,
        today: NaiveDate,
    ) -> Result<Player, ValidationError> {
        for field in TEXT_FIELDS {
            Self::validate_text(field, raw.get(field))?;
        }

        let birth_date = Self::parse_birth_date(&raw.birth_date)?;
        Self::validate_birth_date(birth_date, rules, today)?;

        Ok(Player::from_parts(
            raw.full_name.trim().to_string(),
            birth_date,
            raw.team.trim().to_string(),
            raw.home_city.trim().to_string(),
            raw.squad.trim().to_string(),
            raw.position.trim().to_string(),
        ))
    }

    /// Mandatory text: non-empty after trimming
    pub fn validate_text(field: PlayerField, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField(field));
        }
        Ok(())
    }

    pub fn parse_birth_date(value: &str) -> Result<NaiveDate, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField(PlayerField::BirthDate));
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map_err(|_| ValidationError::UnparseableDate { value: trimmed.to_string() })
    }

    /// Not after `today`, not before the configured minimum year
    pub fn validate_birth_date(
        date: NaiveDate,
        rules: &ValidationRules,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        if date > today {
            return Err(ValidationError::FutureDate { date, today });
        }

        if date.year() < rules.min_birth_year {
            return Err(ValidationError::DateTooEarly { date, min_year: rules.min_birth_year });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn messi() -> RawPlayer {
        RawPlayer {
            full_name: "Lionel Messi".to_string(),
            birth_date: "1987-06-24".to_string(),
            team: "Inter Miami".to_string(),
            home_city: "Miami".to_string(),
            squad: "Main".to_string(),
            position: "Forward".to_string(),
        }
    }

    #[test]
    fn test_validate_success() {
        let player = PlayerValidator::validate(&messi(), &ValidationRules::default(), today())
            .expect("valid player");

        assert_eq!(player.full_name(), "Lionel Messi");
        assert_eq!(player.birth_date(), NaiveDate::from_ymd_opt(1987, 6, 24).unwrap());
        assert_eq!(player.team(), "Inter Miami");
        assert_eq!(player.position(), "Forward");
    }

    #[test]
    fn test_validate_trims_fields() {
        let mut raw = messi();
        raw.full_name = "  Lionel Messi ".to_string();
        raw.birth_date = " 1987-06-24\n".to_string();
        raw.squad = "\tMain".to_string();

        let player =
            PlayerValidator::validate(&raw, &ValidationRules::default(), today()).unwrap();
        assert_eq!(player.full_name(), "Lionel Messi");
        assert_eq!(player.squad(), "Main");
    }

    #[test]
    fn test_empty_fields_named() {
        for field in PlayerField::all() {
            let mut raw = messi();
            raw.set(*field, "   ");

            let err = PlayerValidator::validate(&raw, &ValidationRules::default(), today())
                .unwrap_err();
            assert_eq!(err, ValidationError::EmptyField(*field));
            assert_eq!(err.field(), *field);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let mut raw = messi();
        raw.team = String::new();
        raw.position = String::new();
        raw.birth_date = "not a date".to_string();

        let err =
            PlayerValidator::validate(&raw, &ValidationRules::default(), today()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField(PlayerField::Team));
    }

    #[test]
    fn test_text_checked_before_date() {
        let mut raw = messi();
        raw.birth_date = "31/12/1990".to_string();
        raw.position = String::new();

        let err =
            PlayerValidator::validate(&raw, &ValidationRules::default(), today()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField(PlayerField::Position));
    }

    #[test]
    fn test_unparseable_dates() {
        for bad in ["1990-13-01", "1990-02-30", "31/12/1990", "yesterday"] {
            let mut raw = messi();
            raw.birth_date = bad.to_string();
            let err = PlayerValidator::validate(&raw, &ValidationRules::default(), today())
                .unwrap_err();
            assert!(
                matches!(err, ValidationError::UnparseableDate { .. }),
                "{bad} should be unparseable, got {err:?}"
            );
        }
    }

    #[test]
    fn test_future_date_rejected() {
        let mut raw = messi();
        raw.birth_date = "2024-06-02".to_string();
        let err =
            PlayerValidator::validate(&raw, &ValidationRules::default(), today()).unwrap_err();
        assert!(matches!(err, ValidationError::FutureDate { .. }));

        // Born today is allowed
        raw.birth_date = "2024-06-01".to_string();
        assert!(PlayerValidator::validate(&raw, &ValidationRules::default(), today()).is_ok());
    }

    #[test]
    fn test_min_birth_year() {
        let rules = ValidationRules { min_birth_year: 1950 };

        let mut raw = messi();
        raw.birth_date = "1949-12-31".to_string();
        let err = PlayerValidator::validate(&raw, &rules, today()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DateTooEarly {
                date: NaiveDate::from_ymd_opt(1949, 12, 31).unwrap(),
                min_year: 1950
            }
        );

        raw.birth_date = "1950-01-01".to_string();
        assert!(PlayerValidator::validate(&raw, &rules, today()).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::EmptyField(PlayerField::HomeCity).to_string(),
            "Home city must not be empty"
        );
        let err = ValidationError::UnparseableDate { value: "1990/01/01".to_string() };
        assert!(err.to_string().contains("1990/01/01"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn text() -> impl Strategy<Value = String> {
            "[A-Za-z][A-Za-z .'-]{0,20}"
        }

        proptest! {
            /// Property: any non-blank input validates to its trimmed value
            #[test]
            fn prop_valid_input_roundtrips_trimmed(
                name in text(),
                team in text(),
                city in text(),
                pad in "[ \t]{0,3}",
                days in 0i64..40_000,
            ) {
                let date = today() - chrono::Duration::days(days);
                let raw = RawPlayer {
                    full_name: format!("{pad}{name}{pad}"),
                    birth_date: date.format(DATE_FORMAT).to_string(),
                    team: team.clone(),
                    home_city: city.clone(),
                    squad: "Youth".to_string(),
                    position: "Goalkeeper".to_string(),
                };

                let player = PlayerValidator::validate(&raw, &ValidationRules::default(), today())
                    .unwrap();
                prop_assert_eq!(player.full_name(), name.trim());
                prop_assert_eq!(player.team(), team.trim());
                prop_assert_eq!(player.home_city(), city.trim());
                prop_assert_eq!(player.birth_date(), date);
            }

            /// Property: every date after today is rejected
            #[test]
            fn prop_future_dates_rejected(days in 1i64..100_000) {
                let mut raw = messi();
                raw.birth_date = (today() + chrono::Duration::days(days))
                    .format(DATE_FORMAT)
                    .to_string();

                let result = PlayerValidator::validate(&raw, &ValidationRules::default(), today());
                let is_future = matches!(result, Err(ValidationError::FutureDate { .. }));
                prop_assert!(is_future);
            }
        }
    }
}

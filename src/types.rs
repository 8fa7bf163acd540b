//! Core types shared by movies and the store.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A movie attribute that can be changed through a field update.
///
/// The id is deliberately absent: it is the store key and never changes
/// once a movie is managed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Director,
    Year,
    Duration,
    Genre,
    Rating,
}

impl Field {
    /// All updatable fields, in display order.
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Director,
        Field::Year,
        Field::Duration,
        Field::Genre,
        Field::Rating,
    ];

    /// Key used for this field in update requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Director => "director",
            Field::Year => "year",
            Field::Duration => "duration",
            Field::Genre => "genre",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CatalogError;

    /// Case-insensitive match on the update key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownField(s.to_string()))
    }
}

/// A single broken constraint on a movie.
///
/// The display text is the message shown to users and written into load
/// reports.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Violation {
    #[error("id required")]
    MissingId,

    #[error("title required")]
    MissingTitle,

    #[error("director required")]
    MissingDirector,

    #[error("year must be >= {min}")]
    YearTooEarly { min: i32 },

    #[error("year must be <= {max}")]
    YearTooLate { max: i32 },

    #[error("duration must be > 0")]
    NonPositiveDuration,

    #[error("genre required")]
    MissingGenre,

    #[error("rating must be 1.0..10.0")]
    RatingOutOfRange,
}

impl Violation {
    /// Name of the attribute this violation is about.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingId => "id",
            Violation::MissingTitle => Field::Title.as_str(),
            Violation::MissingDirector => Field::Director.as_str(),
            Violation::YearTooEarly { .. } | Violation::YearTooLate { .. } => Field::Year.as_str(),
            Violation::NonPositiveDuration => Field::Duration.as_str(),
            Violation::MissingGenre => Field::Genre.as_str(),
            Violation::RatingOutOfRange => Field::Rating.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_is_case_insensitive() {
        assert_eq!("title".parse::<Field>().unwrap(), Field::Title);
        assert_eq!("DURATION".parse::<Field>().unwrap(), Field::Duration);
        assert_eq!("RaTiNg".parse::<Field>().unwrap(), Field::Rating);
    }

    #[test]
    fn test_field_parse_rejects_unknown_keys() {
        assert!(matches!(
            "budget".parse::<Field>(),
            Err(CatalogError::UnknownField(name)) if name == "budget"
        ));
        // The id is a key, not an updatable field.
        assert!("id".parse::<Field>().is_err());
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(Violation::MissingTitle.to_string(), "title required");
        assert_eq!(
            Violation::YearTooEarly { min: 1888 }.to_string(),
            "year must be >= 1888"
        );
        assert_eq!(
            Violation::YearTooLate { max: 2031 }.to_string(),
            "year must be <= 2031"
        );
        assert_eq!(Violation::RatingOutOfRange.to_string(), "rating must be 1.0..10.0");
    }

    #[test]
    fn test_violation_field_names() {
        assert_eq!(Violation::MissingId.field(), "id");
        assert_eq!(Violation::YearTooLate { max: 2000 }.field(), "year");
        assert_eq!(Violation::NonPositiveDuration.field(), "duration");
    }
}

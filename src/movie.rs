//! The movie entity and its field constraints.
//!
//! Construction is unchecked. A movie built from bad data is still a
//! movie; [`Movie::validate`] reports everything wrong with it at once so
//! batch callers can decide what to do without unwinding.

use crate::types::Violation;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::fmt;

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1888;

/// Latest accepted release year: the current year plus one, so announced
/// releases can be entered early.
///
/// Read from the wall clock on every call.
pub fn max_allowed_year() -> i32 {
    Local::now().year() + 1
}

/// A single movie.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    id: String,
    title: String,
    director: String,
    year: i32,
    duration_minutes: f64,
    genre: String,
    rating: f64,
}

impl Movie {
    /// Build a movie from raw values without checking them.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        director: impl Into<String>,
        year: i32,
        duration_minutes: f64,
        genre: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            director: director.into(),
            year,
            duration_minutes,
            genre: genre.into(),
            rating,
        }
    }

    /// Every constraint this movie currently breaks. Empty means valid.
    pub fn validate(&self) -> Vec<Violation> {
        [
            check_text(&self.id, Violation::MissingId),
            check_text(&self.title, Violation::MissingTitle),
            check_text(&self.director, Violation::MissingDirector),
            check_year(self.year),
            check_duration(self.duration_minutes),
            check_text(&self.genre, Violation::MissingGenre),
            check_rating(self.rating),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    // --- Setters ---
    //
    // Each setter checks only its own field. On rejection the movie is
    // left exactly as it was.

    pub fn try_set_title(&mut self, value: &str) -> Result<(), Violation> {
        check_text(value, Violation::MissingTitle)?;
        self.title = value.trim().to_string();
        Ok(())
    }

    pub fn try_set_director(&mut self, value: &str) -> Result<(), Violation> {
        check_text(value, Violation::MissingDirector)?;
        self.director = value.trim().to_string();
        Ok(())
    }

    pub fn try_set_year(&mut self, value: i32) -> Result<(), Violation> {
        check_year(value)?;
        self.year = value;
        Ok(())
    }

    pub fn try_set_duration_minutes(&mut self, value: f64) -> Result<(), Violation> {
        check_duration(value)?;
        self.duration_minutes = value;
        Ok(())
    }

    pub fn try_set_genre(&mut self, value: &str) -> Result<(), Violation> {
        check_text(value, Violation::MissingGenre)?;
        self.genre = value.trim().to_string();
        Ok(())
    }

    pub fn try_set_rating(&mut self, value: f64) -> Result<(), Violation> {
        check_rating(value)?;
        self.rating = value;
        Ok(())
    }

    /// Set the title (trimmed). Returns false and keeps the old value if blank.
    pub fn set_title(&mut self, value: &str) -> bool {
        self.try_set_title(value).is_ok()
    }

    /// Set the director (trimmed). Returns false and keeps the old value if blank.
    pub fn set_director(&mut self, value: &str) -> bool {
        self.try_set_director(value).is_ok()
    }

    /// Set the release year. Returns false if outside `MIN_YEAR..=max_allowed_year()`.
    pub fn set_year(&mut self, value: i32) -> bool {
        self.try_set_year(value).is_ok()
    }

    /// Set the running time. Returns false unless strictly positive.
    pub fn set_duration_minutes(&mut self, value: f64) -> bool {
        self.try_set_duration_minutes(value).is_ok()
    }

    /// Set the genre (trimmed). Returns false and keeps the old value if blank.
    pub fn set_genre(&mut self, value: &str) -> bool {
        self.try_set_genre(value).is_ok()
    }

    /// Set the rating. Returns false if outside `1.0..=10.0`.
    pub fn set_rating(&mut self, value: f64) -> bool {
        self.try_set_rating(value).is_ok()
    }

    // --- Getters ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {:.1} min | {} | {:.1}",
            self.id,
            self.title,
            self.director,
            self.year,
            self.duration_minutes,
            self.genre,
            self.rating
        )
    }
}

// --- Constraint checks ---

fn check_text(value: &str, missing: Violation) -> Result<(), Violation> {
    if value.trim().is_empty() {
        Err(missing)
    } else {
        Ok(())
    }
}

fn check_year(year: i32) -> Result<(), Violation> {
    let max = max_allowed_year();
    if year < MIN_YEAR {
        Err(Violation::YearTooEarly { min: MIN_YEAR })
    } else if year > max {
        Err(Violation::YearTooLate { max })
    } else {
        Ok(())
    }
}

fn check_duration(minutes: f64) -> Result<(), Violation> {
    // NaN fails the comparison and is rejected.
    if minutes > 0.0 {
        Ok(())
    } else {
        Err(Violation::NonPositiveDuration)
    }
}

fn check_rating(rating: f64) -> Result<(), Violation> {
    if (1.0..=10.0).contains(&rating) {
        Ok(())
    } else {
        Err(Violation::RatingOutOfRange)
    }
}

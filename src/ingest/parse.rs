//! Row parsing.

use super::report::LoadIssue;
use crate::movie::Movie;

/// Positional columns per row: id, title, director, year, duration, genre, rating.
pub const COLUMNS: usize = 7;

/// Turn one non-blank line into a validated movie.
///
/// Extra columns past the seventh are ignored. Every scalar is trimmed
/// before use.
pub(crate) fn parse_row(line: &str, line_no: usize, delimiter: char) -> Result<Movie, LoadIssue> {
    let cols: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    if cols.len() < COLUMNS {
        return Err(LoadIssue::BadColumns {
            line: line_no,
            expected: COLUMNS,
        });
    }

    let (year, duration, rating) = match (
        cols[3].parse::<i32>(),
        cols[4].parse::<f64>(),
        cols[6].parse::<f64>(),
    ) {
        (Ok(year), Ok(duration), Ok(rating)) => (year, duration, rating),
        _ => return Err(LoadIssue::BadNumbers { line: line_no }),
    };

    let movie = Movie::new(cols[0], cols[1], cols[2], year, duration, cols[5], rating);

    let reasons = movie.validate();
    if !reasons.is_empty() {
        return Err(LoadIssue::Validation {
            line: line_no,
            reasons,
        });
    }

    Ok(movie)
}

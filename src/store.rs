//! The in-memory movie store.

use crate::error::{CatalogError, Result};
use crate::ingest::{parse_row, LoadIssue, LoadReport};
use crate::movie::Movie;
use crate::types::Field;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Column separator for bulk loads.
    pub delimiter: char,

    /// Letter used to pad generated ids when a title has fewer than three letters.
    pub id_filler: char,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            id_filler: 'X',
        }
    }
}

/// Number of title letters used as the generated id prefix.
const ID_PREFIX_LEN: usize = 3;

/// Ordered, in-memory collection of valid movies with unique ids.
///
/// Ids are compared case-insensitively everywhere. Insertion order is
/// preserved and is the order [`MovieStore::all`] returns.
#[derive(Debug, Default)]
pub struct MovieStore {
    config: StoreConfig,
    movies: Vec<Movie>,
}

impl MovieStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            movies: Vec::new(),
        }
    }

    // --- CRUD ---

    /// Add a movie if it is valid and its id is not already taken.
    ///
    /// Returns false and leaves the store untouched otherwise.
    pub fn add(&mut self, movie: Movie) -> bool {
        let violations = movie.validate();
        if !violations.is_empty() {
            debug!(id = movie.id(), ?violations, "rejected invalid movie");
            return false;
        }
        if self.position(movie.id()).is_some() {
            debug!(id = movie.id(), "rejected duplicate movie id");
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Look up a movie by case-insensitive id.
    pub fn find_by_id(&self, id: &str) -> Option<&Movie> {
        self.position(id).map(|idx| &self.movies[idx])
    }

    /// Mutable access to a single managed movie.
    ///
    /// Only the movie's own setters are reachable through this, so the
    /// collection itself cannot be reshaped.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Movie> {
        self.position(id).map(move |idx| &mut self.movies[idx])
    }

    /// Every managed movie, in insertion order.
    pub fn all(&self) -> &[Movie] {
        &self.movies
    }

    /// Remove a movie by case-insensitive id. Returns false if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.movies.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| ids_match(m.id(), id))
    }

    // --- Updates ---

    /// Apply several textual field updates to one movie, all or nothing.
    ///
    /// Fields are applied in iteration order and processing stops at the
    /// first unknown key, unparseable number or rejected value. On any
    /// failure the movie is restored to exactly what it was before the
    /// call. An empty update succeeds without touching anything.
    pub fn update_fields<I, K, V>(&mut self, id: &str, fields: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match self.try_update_fields(id, fields) {
            Ok(()) => true,
            Err(e) => {
                debug!(id, error = %e, "update rejected");
                false
            }
        }
    }

    /// Same as [`MovieStore::update_fields`], but says why it failed.
    pub fn try_update_fields<I, K, V>(&mut self, id: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let movie = self
            .find_by_id_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let snapshot = movie.clone();

        let result = fields
            .into_iter()
            .try_for_each(|(key, value)| apply_field(movie, key.as_ref(), value.as_ref()));

        if result.is_err() {
            *movie = snapshot;
        }
        result
    }

    /// Update a single field. See [`MovieStore::update_fields`].
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> bool {
        self.update_fields(id, [(field, value)])
    }

    // --- Queries ---

    /// Mean running time across all movies, or `None` when the store is empty.
    pub fn average_duration(&self) -> Option<f64> {
        if self.movies.is_empty() {
            return None;
        }
        let total: f64 = self.movies.iter().map(Movie::duration_minutes).sum();
        Some(total / self.movies.len() as f64)
    }

    /// Derive an id from a title and year that is not yet used in this store.
    ///
    /// The first three ASCII letters of the title, upper-cased and padded
    /// with the configured filler, followed by the year. Collisions get a
    /// `-1`, `-2`, ... suffix.
    pub fn generate_id(&self, title: &str, year: i32) -> String {
        let prefix: String = title
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .chain(std::iter::repeat(self.config.id_filler))
            .take(ID_PREFIX_LEN)
            .collect();

        let base = format!("{prefix}{year}");
        let mut candidate = base.clone();
        let mut suffix = 1u32;
        while self.position(&candidate).is_some() {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        candidate
    }

    // --- Bulk Load ---

    /// Load movies from a CSV file.
    ///
    /// Never fails: a missing file or read error ends up in the report
    /// alongside per-line problems.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> LoadReport {
        let path = path.as_ref();
        if !path.is_file() {
            warn!(path = %path.display(), "load source not found");
            return LoadReport {
                loaded: 0,
                errors: vec![LoadIssue::SourceNotFound {
                    path: path.display().to_string(),
                }],
            };
        }

        match File::open(path) {
            Ok(file) => self.load_from_reader(BufReader::new(file)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load source could not be opened");
                LoadReport {
                    loaded: 0,
                    errors: vec![LoadIssue::SourceUnreadable {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }],
                }
            }
        }
    }

    /// Load movies from any buffered line source.
    ///
    /// Blank lines are skipped but still counted. Bytes that are not valid
    /// UTF-8 are replaced rather than rejected, so an oddly encoded row
    /// still loads. Only an I/O error from the source stops the batch;
    /// rows loaded before it stay loaded.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> LoadReport {
        let mut report = LoadReport::new();

        for (idx, raw) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let line = match raw {
                Ok(mut bytes) => {
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                    String::from_utf8_lossy(&bytes).into_owned()
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "load aborted by read error");
                    report.errors.push(LoadIssue::Read {
                        line: line_no,
                        message: e.to_string(),
                    });
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_row(&line, line_no, self.config.delimiter) {
                Ok(movie) => {
                    if self.add(movie) {
                        report.loaded += 1;
                    } else {
                        report.errors.push(LoadIssue::AddFailed { line: line_no });
                    }
                }
                Err(issue) => {
                    debug!(line = line_no, %issue, "skipped row");
                    report.errors.push(issue);
                }
            }
        }

        info!(
            loaded = report.loaded,
            errors = report.errors.len(),
            "bulk load finished"
        );
        report
    }
}

/// Apply one textual field update through the movie's own setter.
fn apply_field(movie: &mut Movie, key: &str, value: &str) -> Result<()> {
    let field: Field = key.parse()?;
    match field {
        Field::Title => movie.try_set_title(value)?,
        Field::Director => movie.try_set_director(value)?,
        Field::Year => movie.try_set_year(parse_number(field, value)?)?,
        Field::Duration => movie.try_set_duration_minutes(parse_number(field, value)?)?,
        Field::Genre => movie.try_set_genre(value)?,
        Field::Rating => movie.try_set_rating(parse_number(field, value)?)?,
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(field: Field, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Case-insensitive id comparison.
fn ids_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

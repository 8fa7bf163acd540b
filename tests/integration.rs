//! Integration tests for the movie catalog.

use movie_catalog::{max_allowed_year, LoadIssue, Movie, MovieStore, SharedStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

// --- Realistic Workflow Tests ---

#[test]
fn test_load_then_edit_workflow() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "movies_ok.csv",
        &[
            "AVA2015,Avatar,James Cameron,2009,162,Science Fiction,8.0",
            "INT2010,Inception,Christopher Nolan,2010,148,Science Fiction,9.0",
            "GOD1972,The Godfather,Francis Ford Coppola,1972,175,Crime,9.2",
        ],
    );

    let mut store = MovieStore::new();
    let report = store.load_csv(&path);
    assert_eq!(report.loaded, 3);
    assert!(report.errors.is_empty());
    assert_eq!(store.all().len(), 3);

    // Manual add with a generated id
    let id = store.generate_id("The Matrix", 1999);
    assert_eq!(id, "THE1999");
    assert!(store.add(Movie::new(&id, "The Matrix", "Wachowski", 1999, 136.0, "Science Fiction", 8.7)));

    // Edit a loaded movie
    assert!(store.update_fields("god1972", [("rating", "9.3"), ("genre", "Crime Drama")]));
    let godfather = store.find_by_id("GOD1972").unwrap();
    assert_eq!(godfather.rating(), 9.3);
    assert_eq!(godfather.genre(), "Crime Drama");

    // Remove one and check the aggregate
    assert!(store.remove("ava2015"));
    let avg = store.average_duration().unwrap();
    assert!((avg - (148.0 + 175.0 + 136.0) / 3.0).abs() < 1e-9);

    let ids: Vec<&str> = store.all().iter().map(Movie::id).collect();
    assert_eq!(ids, vec!["INT2010", "GOD1972", "THE1999"]);
}

#[test]
fn test_mixed_csv_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "movies_mixed.csv",
        &[
            "OKK2000,Ok Movie,Dir,2000,100,Drama,7.5",
            "BADYEAR,BadY,Dir,abcd,120,Drama,8.0",
            "BADDUR,BadD,Dir,2001,xx,Drama,8.0",
            "BADRAT,BadR,Dir,2002,110,Drama,xx",
            "DUP2005,DuplicateID,Dir,2005,95,Action,7.0",
            "DUP2005,DuplicateIDAgain,Dir,2006,100,Action,8.0",
        ],
    );

    let mut store = MovieStore::new();
    let report = store.load_csv(&path);

    assert_eq!(report.loaded, 2);
    assert!(report.errors.len() >= 4);
    assert_eq!(
        report
            .errors
            .iter()
            .filter(|e| matches!(e, LoadIssue::BadNumbers { .. }))
            .count(),
        3
    );
    assert!(report.errors.contains(&LoadIssue::AddFailed { line: 6 }));
    assert_eq!(store.all().len(), 2);
    assert_eq!(report.summary(), "Loaded=2, Errors=4");
}

#[test]
fn test_update_rollback_restores_all_attributes() {
    let mut store = MovieStore::new();
    assert!(store.add(Movie::new("U2", "Title", "Dir", 2000, 100.0, "Drama", 7.0)));
    let before = store.find_by_id("U2").unwrap().clone();

    let too_late = (max_allowed_year() + 1).to_string();
    let ok = store.update_fields(
        "U2",
        [
            ("title", "ShouldNotStick"),
            ("director", "Nobody"),
            ("duration", "90"),
            ("year", too_late.as_str()),
            ("genre", "Never Applied"),
        ],
    );

    assert!(!ok);
    let after = store.find_by_id("U2").unwrap();
    assert_eq!(after, &before);
    assert_eq!(after.title(), "Title");
    assert_eq!(after.year(), 2000);
}

#[test]
fn test_year_bounds_are_dynamic() {
    let max = max_allowed_year();
    let at = |year| Movie::new("ID", "Title", "Director", year, 120.0, "Genre", 8.0);

    assert!(at(max).validate().is_empty());
    assert!(!at(max + 1).validate().is_empty());
    assert!(at(1888).validate().is_empty());
    assert!(!at(1887).validate().is_empty());
}

#[test]
fn test_generate_id_scenario() {
    let mut store = MovieStore::new();
    let id = store.generate_id("Inception", 2010);
    assert_eq!(id, "INC2010");

    assert!(store.add(Movie::new(id, "Inception", "Christopher Nolan", 2010, 148.0, "Sci-Fi", 8.8)));
    assert_eq!(store.generate_id("Inception", 2010), "INC2010-1");
}

#[test]
fn test_shared_store_wraps_existing_store() {
    let mut store = MovieStore::new();
    assert!(store.add(Movie::new("A", "T1", "D1", 2000, 100.0, "G", 7.0)));
    assert!(store.add(Movie::new("B", "T2", "D2", 2001, 200.0, "G", 8.0)));

    let shared = SharedStore::new(store);
    let other = shared.clone();

    assert!(other.with(|s| s.remove("a")));
    assert_eq!(shared.with(|s| s.average_duration()), Some(200.0));
}

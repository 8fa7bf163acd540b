//! One-shot commands that load a CSV and print something about it.

use clap::ValueEnum;
use movie_catalog::{LoadReport, MovieStore};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Output format for one-shot commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn load(path: &Path) -> (MovieStore, LoadReport) {
    let mut store = MovieStore::new();
    let report = store.load_csv(path);
    if !report.is_clean() {
        warn!(path = %path.display(), errors = report.errors.len(), "load reported errors");
    }
    (store, report)
}

/// Load `path` and print the load report.
pub fn report(path: &Path, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let (_, report) = load(path);
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", report.summary())?;
            for issue in &report.errors {
                writeln!(out, " - {issue}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Load `path` and print every movie that made it in.
pub fn list(path: &Path, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let (store, _) = load(path);
    match format {
        OutputFormat::Text => {
            if store.is_empty() {
                writeln!(out, "(no movies)")?;
            }
            for movie in store.all() {
                writeln!(out, "{movie}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, store.all())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Load `path` and print the average running time.
pub fn average(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let (store, _) = load(path);
    match store.average_duration() {
        Some(avg) => writeln!(out, "Average duration: {avg:.2} min")?,
        None => writeln!(out, "No movies in the system.")?,
    }
    Ok(())
}

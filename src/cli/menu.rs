//! Interactive menu over a [`MovieStore`].

use super::prompt::Prompter;
use movie_catalog::{max_allowed_year, CatalogError, Field, LoadReport, Movie, MovieStore, MIN_YEAR};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name looked for when the user asks for the default CSV.
pub const DEFAULT_CSV: &str = "movies_sample.csv";

/// Directories searched for [`DEFAULT_CSV`], relative to the working directory.
const SEARCH_DIRS: [&str; 6] = [".", "src", "..", "../src", "../..", "../../src"];

/// Typed in place of a path to paste CSV lines directly.
const PASTE_KEYWORD: &str = "PASTE";

enum Flow {
    Continue,
    Exit,
}

/// The interactive session: a store plus the prompter talking to the user.
pub struct Menu<R, W> {
    prompter: Prompter<R, W>,
    store: MovieStore,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: MovieStore, input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            store,
        }
    }

    /// Run until the user confirms exit or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        self.prompter.say("=== Movie Catalog ===")?;
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompter.ask("Choose (1-7): ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.load()?,
                "2" => self.show_all()?,
                "3" => self.create()?,
                "4" => self.remove()?,
                "5" => self.update()?,
                "6" => self.show_average()?,
                "7" => self.confirm_exit()?,
                _ => {
                    self.prompter.say("Invalid option. Try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        self.prompter.say("Bye!")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        for line in [
            "",
            "1) Load CSV file",
            "2) Display all movies",
            "3) Create (manual add)",
            "4) Remove by MovieID",
            "5) Update multiple fields",
            "6) Average duration",
            "7) Exit",
        ] {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    // --- Actions ---

    fn load(&mut self) -> io::Result<Flow> {
        let Some(answer) = self.prompter.ask(&format!(
            "CSV path, or {PASTE_KEYWORD} to paste lines (ENTER for default '{DEFAULT_CSV}'): "
        ))?
        else {
            return Ok(Flow::Exit);
        };

        if answer.eq_ignore_ascii_case(PASTE_KEYWORD) {
            return self.load_pasted();
        }

        let path = if answer.is_empty() {
            match detect_default_csv(Path::new(".")) {
                Some(path) => {
                    self.prompter
                        .say(format!("Auto-detected file: {}", path.display()))?;
                    path
                }
                None => {
                    self.prompter
                        .say("No default CSV found. Please type a valid path or use PASTE mode.")?;
                    return Ok(Flow::Continue);
                }
            }
        } else {
            PathBuf::from(answer)
        };

        info!(path = %path.display(), "loading csv");
        let report = self.store.load_csv(&path);
        self.print_report(&report)?;
        Ok(Flow::Continue)
    }

    fn load_pasted(&mut self) -> io::Result<Flow> {
        self.prompter
            .say("Paste CSV lines now (id,title,director,year,duration,genre,rating).")?;
        self.prompter.say("Press ENTER on an empty line to finish.")?;

        let mut buffer = String::new();
        let mut exhausted = false;
        loop {
            match self.prompter.read_raw()? {
                Some(line) if line.trim().is_empty() => break,
                Some(line) => {
                    buffer.push_str(&line);
                    buffer.push('\n');
                }
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        let report = self.store.load_from_reader(buffer.as_bytes());
        self.print_report(&report)?;
        Ok(if exhausted { Flow::Exit } else { Flow::Continue })
    }

    fn print_report(&mut self, report: &LoadReport) -> io::Result<()> {
        self.prompter.say(report.summary())?;
        if !report.is_clean() {
            self.prompter.say("Errors:")?;
            for issue in &report.errors {
                self.prompter.say(format!(" - {issue}"))?;
            }
        }
        Ok(())
    }

    fn show_all(&mut self) -> io::Result<Flow> {
        if self.store.is_empty() {
            self.prompter.say("(no movies)")?;
        }
        for movie in self.store.all() {
            self.prompter.say(movie)?;
        }
        Ok(Flow::Continue)
    }

    fn create(&mut self) -> io::Result<Flow> {
        let max_year = max_allowed_year();
        let p = &mut self.prompter;

        let Some(title) = p.ask_non_empty("Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(director) = p.ask_non_empty("Director: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = p.ask_parsed::<i32>(
            &format!("Year ({MIN_YEAR}..{max_year}): "),
            |y| (MIN_YEAR..=max_year).contains(y),
            "Invalid integer. Try again.",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(duration) = p.ask_parsed::<f64>(
            "Duration minutes (>0): ",
            |d| *d > 0.0 && d.is_finite(),
            "Invalid number. Try again.",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(genre) = p.ask_non_empty("Genre: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(rating) = p.ask_parsed::<f64>(
            "Rating (1..10): ",
            |r| (1.0..=10.0).contains(r),
            "Invalid number. Try again.",
        )?
        else {
            return Ok(Flow::Exit);
        };

        let id = self.store.generate_id(&title, year);
        let movie = Movie::new(id, title, director, year, duration, genre, rating);
        let rendered = movie.to_string();
        if self.store.add(movie) {
            self.prompter.say(format!("Added: {rendered}"))?;
        } else {
            self.prompter.say("Add failed (validation or duplicate).")?;
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompter.ask_non_empty("MovieID to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let message = if self.store.remove(&id) {
            "Deleted."
        } else {
            "Not found."
        };
        self.prompter.say(message)?;
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompter.ask_non_empty("MovieID to update: ")? else {
            return Ok(Flow::Exit);
        };
        if self.store.find_by_id(&id).is_none() {
            self.prompter.say("Not found.")?;
            return Ok(Flow::Continue);
        }

        self.prompter.say(
            "Leave empty to skip a field. Available: title | director | year | duration | genre | rating",
        )?;

        let max_year = max_allowed_year();
        let mut changes = Vec::new();
        for field in Field::ALL {
            let prompt = match field {
                Field::Title => "New Title: ".to_string(),
                Field::Director => "New Director: ".to_string(),
                Field::Year => format!("New Year ({MIN_YEAR}..{max_year}): "),
                Field::Duration => "New Duration minutes (>0): ".to_string(),
                Field::Genre => "New Genre: ".to_string(),
                Field::Rating => "New Rating (1..10): ".to_string(),
            };
            let Some(answer) = self.prompter.ask(&prompt)? else {
                return Ok(Flow::Exit);
            };
            if !answer.is_empty() {
                changes.push((field.as_str(), answer));
            }
        }

        match self.store.try_update_fields(&id, changes) {
            Ok(()) => {
                self.prompter.say("Updated.")?;
                if let Some(movie) = self.store.find_by_id(&id) {
                    self.prompter.say(movie)?;
                }
            }
            Err(CatalogError::Invalid(violation)) => self
                .prompter
                .say(format!("Update failed: {} rejected ({violation})", violation.field()))?,
            Err(e) => self.prompter.say(format!("Update failed: {e}"))?,
        }
        Ok(Flow::Continue)
    }

    fn show_average(&mut self) -> io::Result<Flow> {
        match self.store.average_duration() {
            Some(avg) => self.prompter.say(format!("Average duration: {avg:.2} min"))?,
            None => self.prompter.say("No movies in the system.")?,
        }
        Ok(Flow::Continue)
    }

    fn confirm_exit(&mut self) -> io::Result<Flow> {
        let Some(answer) = self.prompter.ask("Exit? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
            Ok(Flow::Exit)
        } else {
            Ok(Flow::Continue)
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (MovieStore, W) {
        (self.store, self.prompter.into_output())
    }
}

/// First existing [`DEFAULT_CSV`] under `base` across [`SEARCH_DIRS`].
pub fn detect_default_csv(base: &Path) -> Option<PathBuf> {
    SEARCH_DIRS
        .iter()
        .map(|dir| base.join(dir).join(DEFAULT_CSV))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(store: MovieStore, script: &str) -> (MovieStore, String) {
        let mut menu = Menu::new(store, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        menu.run().unwrap();
        let (store, out) = menu.into_parts();
        (store, String::from_utf8(out).unwrap())
    }

    fn seeded() -> MovieStore {
        let mut store = MovieStore::new();
        assert!(store.add(Movie::new("MAT1999", "The Matrix", "Wachowski", 1999, 136.0, "Sci-Fi", 8.7)));
        store
    }

    #[test]
    fn test_exit_requires_confirmation() {
        let (_, out) = run(MovieStore::new(), "7\nn\n7\nYES\n");
        assert_eq!(out.matches("Exit? (y/n): ").count(), 2);
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_eof_ends_session() {
        let (_, out) = run(MovieStore::new(), "");
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_invalid_option() {
        let (_, out) = run(MovieStore::new(), "9\n");
        assert!(out.contains("Invalid option. Try again."));
    }

    #[test]
    fn test_show_all_and_average_empty() {
        let (_, out) = run(MovieStore::new(), "2\n6\n");
        assert!(out.contains("(no movies)"));
        assert!(out.contains("No movies in the system."));
    }

    #[test]
    fn test_create_generates_id_and_retries() {
        let script = "3\nInception\nChristopher Nolan\nsoon\n2010\n-3\n148\nSci-Fi\n11\n8.8\n2\n";
        let (store, out) = run(MovieStore::new(), script);

        assert!(out.contains("Invalid integer. Try again."));
        assert_eq!(out.matches("Invalid number. Try again.").count(), 2);
        assert!(out.contains("Added: INC2010 | Inception | Christopher Nolan | 2010 | 148.0 min | Sci-Fi | 8.8"));
        assert!(store.find_by_id("INC2010").is_some());
    }

    #[test]
    fn test_remove() {
        let (store, out) = run(seeded(), "4\nnope\n4\nmat1999\n");
        assert!(out.contains("Not found."));
        assert!(out.contains("Deleted."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_skips_blank_fields() {
        let script = "5\nMAT1999\n\n\n\n140\nAction\n\n";
        let (store, out) = run(seeded(), script);

        assert!(out.contains("Updated."));
        let movie = store.find_by_id("MAT1999").unwrap();
        assert_eq!(movie.title(), "The Matrix");
        assert_eq!(movie.duration_minutes(), 140.0);
        assert_eq!(movie.genre(), "Action");
    }

    #[test]
    fn test_update_failure_rolls_back() {
        let script = "5\nMAT1999\nReloaded\n\n3040\n\n\n\n";
        let (store, out) = run(seeded(), script);

        assert!(out.contains("Update failed: year rejected (year must be <="));
        assert_eq!(store.find_by_id("MAT1999").unwrap().title(), "The Matrix");
    }

    #[test]
    fn test_update_reports_unparseable_number() {
        let script = "5\nMAT1999\n\n\n\nlong\n\n\n";
        let (store, out) = run(seeded(), script);

        assert!(out.contains("Update failed: Invalid number for duration: \"long\""));
        assert_eq!(store.find_by_id("MAT1999").unwrap().duration_minutes(), 136.0);
    }

    #[test]
    fn test_update_unknown_id() {
        let (_, out) = run(seeded(), "5\nXYZ\n");
        assert!(out.contains("Not found."));
    }

    #[test]
    fn test_paste_mode() {
        let script = "1\npaste\nA,Heat,Mann,1995,170,Crime,8.3\nB,Bad,Dir,year,1,G,5\n\n6\n";
        let (store, out) = run(MovieStore::new(), script);

        assert!(out.contains("Loaded=1, Errors=1"));
        assert!(out.contains(" - Bad numeric values at line 2"));
        assert!(out.contains("Average duration: 170.00 min"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_by_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("movies.csv");
        fs::write(&file, "A,Heat,Mann,1995,170,Crime,8.3\nB,Alien,Scott,1979,117,Horror,8.5\n").unwrap();

        let script = format!("1\n{}\n2\n", file.display());
        let (store, out) = run(MovieStore::new(), &script);

        assert!(out.contains("Loaded=2, Errors=0"));
        assert!(out.contains("B | Alien | Scott | 1979 | 117.0 min | Horror | 8.5"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_missing_path() {
        let (_, out) = run(MovieStore::new(), "1\nnot_exists_123.csv\n");
        assert!(out.contains("Loaded=0, Errors=1"));
        assert!(out.contains(" - File not found: not_exists_123.csv"));
    }

    #[test]
    fn test_detect_default_csv() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("a").join("b");
        fs::create_dir_all(&base).unwrap();
        assert_eq!(detect_default_csv(&base), None);

        let src = dir.path().join("a").join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(DEFAULT_CSV), "").unwrap();
        assert_eq!(
            detect_default_csv(&base),
            Some(base.join("../src").join(DEFAULT_CSV))
        );

        fs::write(base.join(DEFAULT_CSV), "").unwrap();
        assert_eq!(
            detect_default_csv(&base),
            Some(base.join(".").join(DEFAULT_CSV))
        );
    }
}

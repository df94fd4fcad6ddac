//! Loading names and language profiles from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use triglot_types::Trigram;

use crate::error::{self, Result};
use crate::language::{LanguageProfile, LanguageSet};
use crate::profile::TrigramProfile;
use crate::store::csv::records;

/// File extension of stored profiles.
pub const PROFILE_EXTENSION: &str = "csv";

/// A language code and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageName {
    /// Short code, also the profile file stem.
    pub code: String,
    /// Human-readable name.
    pub name: String,
}

/// Loaded languages together with their display names.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    /// Profiles in names-file order.
    pub languages: LanguageSet,
    /// The names table as read.
    pub names: Vec<LanguageName>,
}

impl LanguageCatalog {
    /// Display name for a language code, if one was loaded.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.code == code)
            .map(|n| n.name.as_str())
    }
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(error::io(path))
}

/// Path of the stored profile for `code` under `trigrams_dir`.
pub fn profile_path(trigrams_dir: &Path, code: &str) -> PathBuf {
    trigrams_dir.join(format!("{code}.{PROFILE_EXTENSION}"))
}

/// Reads the `(code, name)` table in file order.
///
/// Records that do not have exactly two fields are skipped.
pub fn load_names(path: &Path) -> Result<Vec<LanguageName>> {
    let text = read_table(path)?;
    let mut names = Vec::new();

    for record in records(&text) {
        let fields = record
            .fields
            .map_err(|reason| error::parse(path, record.line, reason))?;
        if fields.len() != 2 {
            debug!(path = %path.display(), line = record.line, "skipping record");
            continue;
        }

        let mut fields = fields.into_iter();
        if let (Some(code), Some(name)) = (fields.next(), fields.next()) {
            names.push(LanguageName { code, name });
        }
    }

    Ok(names)
}

/// Reads a stored `(trigram, count)` table into a profile.
///
/// At most `max_rows` rows are loaded when given; stored profiles are sorted
/// most frequent first, so this keeps the head of the distribution. The
/// returned profile is not normalized.
pub fn load_profile(path: &Path, max_rows: Option<usize>) -> Result<TrigramProfile> {
    let text = read_table(path)?;
    let max_rows = max_rows.unwrap_or(usize::MAX);
    let mut profile = TrigramProfile::with_capacity(1024);
    let mut rows = 0usize;

    for record in records(&text) {
        if rows >= max_rows {
            break;
        }

        let fields = record
            .fields
            .map_err(|reason| error::parse(path, record.line, reason))?;
        if fields.len() != 2 {
            debug!(path = %path.display(), line = record.line, "skipping record");
            continue;
        }

        let trigram = Trigram::new(&fields[0]).ok_or_else(|| {
            error::parse(
                path,
                record.line,
                format!("'{}' is not a trigram", fields[0]),
            )
        })?;
        let count = parse_count(&fields[1]).ok_or_else(|| {
            error::parse(
                path,
                record.line,
                format!("'{}' is not a valid count", fields[1]),
            )
        })?;

        profile.insert(trigram, count);
        rows += 1;
    }

    Ok(profile)
}

fn parse_count(field: &str) -> Option<f32> {
    field
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|c| c.is_finite() && *c >= 0.0)
}

/// Loads every language listed in `names_file` from `trigrams_dir`.
///
/// Languages keep names-file order, which decides ties. Each profile is
/// normalized on load. A listed language without a profile file fails the
/// whole load.
pub fn load_language_set(
    trigrams_dir: &Path,
    names_file: &Path,
    max_rows: Option<usize>,
) -> Result<LanguageCatalog> {
    let names = load_names(names_file)?;
    let mut languages = LanguageSet::new();

    for entry in &names {
        let path = profile_path(trigrams_dir, &entry.code);
        let mut profile = load_profile(&path, max_rows)?;
        profile.normalize();

        debug!(
            language = %entry.code,
            trigrams = profile.len(),
            "profile loaded"
        );
        languages.push(LanguageProfile::new(entry.code.clone(), profile))?;
    }

    info!(
        languages = languages.len(),
        dir = %trigrams_dir.display(),
        "language profiles loaded"
    );

    Ok(LanguageCatalog { languages, names })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn names_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "names.csv",
            "\"es\",\"Español\"\r\n\"broken\"\n\n\"en\",\"English\"\n",
        );

        let names = load_names(&path).unwrap();
        let codes: Vec<&str> = names.iter().map(|n| n.code.as_str()).collect();
        assert_eq!(codes, vec!["es", "en"]);
        assert_eq!(names[0].name, "Español");
    }

    #[test]
    fn profile_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "es.csv", "\"de \",\"7\"\n\"la \",5\n\",,,\",\"2.5\"\n");

        let profile = load_profile(&path, None).unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.get_str("de ").unwrap().real, 7.0);
        assert_eq!(profile.get_str(",,,").unwrap().real, 2.5);
        assert!(!profile.is_normalized());

        let head = load_profile(&path, Some(2)).unwrap();
        assert_eq!(head.len(), 2);
        assert!(head.get_str(",,,").is_none());
    }

    #[test]
    fn bad_trigram_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "xx.csv", "\"abc\",\"1\"\n\"abcd\",\"1\"\n");

        match load_profile(&path, None) {
            Err(Error::Parse { line, path: p, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(p, path);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_counts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for count in ["-1", "many", "NaN", "inf"] {
            let path = write(dir.path(), "xx.csv", &format!("\"abc\",\"{count}\"\n"));
            assert!(
                matches!(load_profile(&path, None), Err(Error::Parse { line: 1, .. })),
                "{count}"
            );
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_names(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn language_set_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let trigrams = dir.path().join("trigrams");
        fs::create_dir(&trigrams).unwrap();

        let names = write(dir.path(), "names.csv", "\"es\",\"Español\"\n\"en\",\"English\"\n");
        write(&trigrams, "es.csv", "\"el \",\"3\"\n\" la\",\"4\"\n");
        write(&trigrams, "en.csv", "\"the\",\"5\"\n");

        let catalog = load_language_set(&trigrams, &names, None).unwrap();
        assert_eq!(catalog.languages.len(), 2);
        assert_eq!(catalog.languages.code(0), Some("es"));
        assert_eq!(catalog.name_of("en"), Some("English"));
        assert_eq!(catalog.name_of("fr"), None);

        let es = &catalog.languages.get(0).unwrap().profile;
        assert!(es.is_normalized());
        assert!((es.get_str(" la").unwrap().normalized - 0.8).abs() < 1e-6);
    }

    #[test]
    fn missing_profile_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let names = write(dir.path(), "names.csv", "\"es\",\"Español\"\n\"fr\",\"Français\"\n");
        write(dir.path(), "es.csv", "\"el \",\"3\"\n");

        let err = load_language_set(dir.path(), &names, None).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("fr.csv")));
    }

    #[test]
    fn duplicate_codes_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        let names = write(dir.path(), "names.csv", "\"es\",\"a\"\n\"es\",\"b\"\n");
        write(dir.path(), "es.csv", "\"el \",\"3\"\n");

        let err = load_language_set(dir.path(), &names, None).unwrap_err();
        assert!(matches!(err, Error::DuplicateLanguage { .. }));
    }
}

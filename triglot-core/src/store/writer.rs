//! Writing profiles and the names table.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{self, Result};
use crate::profile::ProfileRow;
use crate::store::csv::{records, write_record};

/// Formats a count, dropping the fraction for whole numbers.
pub fn format_count(count: f32) -> String {
    if count.fract() == 0.0 && count.abs() < 1e15 {
        format!("{}", count as i64)
    } else {
        format!("{count}")
    }
}

/// Writes a sorted frequency table to `path`.
///
/// The table is written to a temporary file next to `path` and renamed into
/// place, so readers never see a half-written profile.
pub fn save_profile(path: &Path, rows: &[ProfileRow]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(error::io(dir))?;

    let tmp = NamedTempFile::new_in(dir).map_err(error::io(dir))?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        for row in rows {
            let count = format_count(row.count);
            write_record(&mut out, &[row.trigram.as_str(), &count]).map_err(error::io(path))?;
        }
        out.flush().map_err(error::io(path))?;
    }
    tmp.persist(path)
        .map_err(|e| error::io(path)(e.error))?;

    info!(path = %path.display(), rows = rows.len(), "profile saved");
    Ok(())
}

/// Appends `code, name` to the names table unless `code` is already listed.
///
/// Creates the file if needed. Returns `true` when a record was added.
pub fn register_language_name(path: &Path, code: &str, name: &str) -> Result<bool> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let listed = records(&text).any(|record| {
                matches!(&record.fields, Ok(fields) if fields.first().map(String::as_str) == Some(code))
            });
            if listed {
                return Ok(false);
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(error::io(path)(err)),
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(error::io(path))?;
    write_record(&mut file, &[code, name]).map_err(error::io(path))?;

    info!(code, name, path = %path.display(), "language registered");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::build;
    use crate::store::loader::{load_names, load_profile};

    #[test]
    fn whole_counts_are_integers() {
        assert_eq!(format_count(12.0), "12");
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(2.5), "2.5");
    }

    #[test]
    fn saved_profile_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("xx.csv");
        let rows = build(["el perro, \"el\" gato", "el perro"]);

        save_profile(&path, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("\" pe\",\"2\"\n"));
        assert!(!text.contains(".0\""));

        let profile = load_profile(&path, None).unwrap();
        assert_eq!(profile.len(), rows.len());
        for row in &rows {
            assert_eq!(profile.get(&row.trigram).unwrap().real, row.count);
        }
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xx.csv");
        save_profile(&path, &build(["aaaa", "bbbb"])).unwrap();
        save_profile(&path, &build(["cccc"])).unwrap();

        let profile = load_profile(&path, None).unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.get_str("ccc").unwrap().real, 2.0);
    }

    #[test]
    fn names_are_registered_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.csv");

        assert!(register_language_name(&path, "grn", "Guaraní").unwrap());
        assert!(register_language_name(&path, "cat", "Catalán").unwrap());
        assert!(!register_language_name(&path, "grn", "Guarani").unwrap());

        let names = load_names(&path).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].name, "Guaraní");
        assert_eq!(names[1].code, "cat");
    }

    #[test]
    fn code_must_match_whole_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.csv");
        fs::write(&path, "\"cpp\",\"C++\"\n").unwrap();

        assert!(register_language_name(&path, "c", "C").unwrap());
        assert_eq!(load_names(&path).unwrap().len(), 2);
    }
}

//! `triglot build`

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use triglot_core::analyzer::for_each_line;
use triglot_core::store::{profile_path, register_language_name, save_profile};
use triglot_core::{ProfileBuilder, ResourceConfig};

/// Language codes double as file names.
fn check_code(code: &str) -> Result<()> {
    if code.is_empty() {
        bail!("language code must not be empty");
    }
    if code
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '"' | ',') || c.is_whitespace() || c.is_control())
        || code == "."
        || code == ".."
    {
        bail!("'{}' is not a usable language code", code);
    }
    Ok(())
}

pub fn run(
    resources: &ResourceConfig,
    corpus: &Path,
    code: &str,
    name: Option<&str>,
    weight: f32,
) -> Result<()> {
    check_code(code)?;

    let file = File::open(corpus)
        .with_context(|| format!("could not open corpus {}", corpus.display()))?;

    let mut builder = ProfileBuilder::with_weight(weight);
    for_each_line(BufReader::new(file), usize::MAX, |line| builder.add_line(line))
        .with_context(|| format!("failed to read corpus {}", corpus.display()))?;

    let lines = builder.lines_read();
    let rows = builder.finish();
    info!(code, lines, trigrams = rows.len(), "corpus profiled");

    let output = profile_path(&resources.trigrams_dir, code);
    save_profile(&output, &rows)
        .with_context(|| format!("could not write profile to {}", output.display()))?;

    let added = register_language_name(&resources.names_file, code, name.unwrap_or(code))
        .with_context(|| format!("could not update {}", resources.names_file.display()))?;

    println!("Profile created for {} -> {}", code, output.display());
    if !added {
        println!("{} already listed in {}", code, resources.names_file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triglot_core::store::{load_language_set, load_names};
    use triglot_core::{identify_lines, Settings};

    fn resources(dir: &Path) -> ResourceConfig {
        ResourceConfig {
            trigrams_dir: dir.join("trigrams"),
            names_file: dir.join("names.csv"),
            profile_rows: None,
        }
    }

    #[test]
    fn codes_are_checked() {
        assert!(check_code("grn").is_ok());
        assert!(check_code("c++").is_ok());
        for bad in ["", "..", "a/b", "a b", "a,b"] {
            assert!(check_code(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn built_profiles_identify() {
        let dir = tempfile::tempdir().unwrap();
        let resources = resources(dir.path());

        let es = dir.path().join("es.txt");
        std::fs::write(&es, "el perro come en la casa\nla abuela duerme en la cama\n").unwrap();
        let en = dir.path().join("en.txt");
        std::fs::write(&en, "the dog eats in the house\r\nthe grandmother sleeps\n").unwrap();

        run(&resources, &es, "es", Some("Español"), 1.0).unwrap();
        run(&resources, &en, "en", None, 1.0).unwrap();
        // Rebuilding keeps a single names entry
        run(&resources, &es, "es", Some("Español"), 1.0).unwrap();

        let names = load_names(&resources.names_file).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[1].name, "en");

        let catalog = load_language_set(&resources.trigrams_dir, &resources.names_file, None).unwrap();
        let best = identify_lines(["la casa del perro"], &catalog.languages, &Settings::default())
            .unwrap();
        assert_eq!(catalog.languages.code(best.id), Some("es"));
    }

    #[test]
    fn missing_corpus_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &resources(dir.path()),
            &dir.path().join("missing.txt"),
            "xx",
            None,
            1.0,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}

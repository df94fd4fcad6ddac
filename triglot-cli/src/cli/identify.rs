//! `triglot identify`

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};
use triglot_core::language::classify::{query_profile_from_buffer, query_profile_from_path};
use triglot_core::{
    load_language_set, Algorithm, Config, LanguageCatalog, LanguageScore, Settings,
    TrigramProfile, ValueMode,
};

/// Settings given on the command line. They win over env and file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub algorithm: Option<Algorithm>,
    pub value_mode: Option<ValueMode>,
    pub line_limit: Option<u32>,
    pub trigram_limit: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(algorithm) = self.algorithm {
            settings.algorithm = algorithm;
        }
        if let Some(mode) = self.value_mode {
            settings.value_mode = mode;
        }
        if let Some(limit) = self.line_limit {
            settings.line_limit = limit;
        }
        if let Some(limit) = self.trigram_limit {
            settings.trigram_limit = limit;
        }
    }
}

/// Where the text to identify comes from.
#[derive(Debug)]
pub enum Input {
    File(PathBuf),
    Stdin,
}

pub fn run(config: Config, overrides: Overrides, input: Input, top: Option<usize>) -> Result<()> {
    let mut settings = config.identify;
    overrides.apply(&mut settings);
    settings.validate().context("invalid identification settings")?;

    let resources = &config.resources;
    let catalog = load_language_set(
        &resources.trigrams_dir,
        &resources.names_file,
        resources.profile_rows,
    )
    .with_context(|| {
        format!(
            "failed to load language profiles from {}",
            resources.trigrams_dir.display()
        )
    })?;
    if catalog.languages.is_empty() {
        warn!(names = %resources.names_file.display(), "no languages listed");
    }

    info!(
        algorithm = %settings.algorithm,
        values = %settings.value_mode,
        line_limit = settings.line_limit,
        trigram_limit = settings.trigram_limit,
        "identifying"
    );

    let started = Instant::now();
    let profile = match input {
        Input::File(path) => query_profile_from_path(&path, &settings),
        Input::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            query_profile_from_buffer(&String::from_utf8_lossy(&bytes), &settings)
        }
    };
    let (results, _) = classify(&catalog, profile.as_ref(), &settings, top, started);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &catalog, &results, top.is_some())?;
    Ok(())
}

/// Scores the query and logs the time spent since `started`.
///
/// Returns the best match, or the `top` best when ranking, together with
/// the elapsed time.
fn classify(
    catalog: &LanguageCatalog,
    profile: Option<&TrigramProfile>,
    settings: &Settings,
    top: Option<usize>,
    started: Instant,
) -> (Vec<LanguageScore>, Duration) {
    let results = match (profile, top) {
        (None, _) => Vec::new(),
        (Some(profile), Some(n)) => catalog.languages.rank(profile, settings, n),
        (Some(profile), None) => catalog
            .languages
            .identify(profile, settings)
            .into_iter()
            .collect(),
    };

    let elapsed = started.elapsed();
    let best = results
        .first()
        .and_then(|r| catalog.languages.code(r.id))
        .unwrap_or("none");
    info!(
        best,
        candidates = results.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        "identified"
    );
    (results, elapsed)
}

/// Prints the best language, or a ranked table when `ranked` is set.
fn write_report<W: Write>(
    out: &mut W,
    catalog: &LanguageCatalog,
    results: &[LanguageScore],
    ranked: bool,
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No match");
    }

    for result in results {
        let code = catalog.languages.code(result.id).unwrap_or("?");
        let name = catalog.name_of(code).unwrap_or(code);
        if ranked {
            writeln!(out, "{}\t{}\t{:.4}", code, name, result.score)?;
        } else {
            writeln!(out, "{} ({})", name, code)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triglot_core::store::LanguageName;

    fn catalog() -> LanguageCatalog {
        let mut catalog = LanguageCatalog::default();
        for (code, name) in [("es", "Español"), ("cpp", "C++")] {
            catalog
                .languages
                .add(code, TrigramProfile::new())
                .unwrap();
            catalog.names.push(LanguageName {
                code: code.into(),
                name: name.into(),
            });
        }
        catalog
    }

    fn report(results: &[LanguageScore], ranked: bool) -> String {
        let mut out = Vec::new();
        write_report(&mut out, &catalog(), results, ranked).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn overrides_win() {
        let mut settings = Settings::default();
        Overrides {
            algorithm: Some(Algorithm::Jaccard),
            line_limit: Some(5),
            ..Default::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.algorithm, Algorithm::Jaccard);
        assert_eq!(settings.line_limit, 5);
        assert_eq!(settings.value_mode, ValueMode::Normalized);
        assert_eq!(settings.trigram_limit, 0);
    }

    #[test]
    fn classify_reports_result_and_time() {
        let mut catalog = LanguageCatalog::default();
        for (code, text) in [("es", "el perro y el gato"), ("en", "the dog and the cat")] {
            let mut profile = TrigramProfile::new();
            profile.add_line(text);
            profile.normalize();
            catalog.languages.add(code, profile).unwrap();
        }

        let mut query = TrigramProfile::new();
        query.add_line("el gato");
        query.normalize();

        let before = Instant::now();
        let (results, elapsed) =
            classify(&catalog, Some(&query), &Settings::default(), None, before);
        assert_eq!(results.len(), 1);
        assert_eq!(catalog.languages.code(results[0].id), Some("es"));
        assert!(elapsed <= before.elapsed());

        let (ranked, _) = classify(&catalog, Some(&query), &Settings::default(), Some(5), before);
        assert_eq!(ranked[0], results[0]);

        let (none, _) = classify(&catalog, None, &Settings::default(), None, Instant::now());
        assert!(none.is_empty());
    }

    #[test]
    fn report_formats() {
        assert_eq!(report(&[], false), "No match\n");
        assert_eq!(report(&[LanguageScore::new(1, 0.5)], false), "C++ (cpp)\n");
        assert_eq!(
            report(&[LanguageScore::new(0, 0.9), LanguageScore::new(1, 0.25)], true),
            "es\tEspañol\t0.9000\ncpp\tC++\t0.2500\n"
        );
    }
}

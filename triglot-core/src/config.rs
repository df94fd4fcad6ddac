//! Configuration for identification and resources.
//!
//! Sources, highest priority first:
//! 1. Command-line flags (applied by the binary)
//! 2. `TRIGLOT_ALGORITHM` environment variable
//! 3. `triglot.toml` (explicit path, or the working directory)
//! 4. Built-in defaults
//!
//! ```toml
//! [identify]
//! algorithm = "jaccard"
//! value-mode = "real"
//! line-limit = 50
//! trigram-limit = 0
//!
//! [resources]
//! trigrams-dir = "resources/trigrams"
//! names-file = "resources/languagecode_names.csv"
//! profile-rows = 2000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use triglot_types::{Algorithm, Settings};

use crate::error::{self, Error, Result};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "triglot.toml";

/// Environment variable overriding the configured algorithm.
pub const ALGORITHM_ENV: &str = "TRIGLOT_ALGORITHM";

/// Merged configuration: identification settings and resource paths.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// `[identify]` section.
    pub identify: Settings,
    /// `[resources]` section.
    pub resources: ResourceConfig,
}

/// Where stored profiles live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResourceConfig {
    /// Directory holding one `<code>.csv` profile per language.
    pub trigrams_dir: PathBuf,
    /// Table of `(code, name)` pairs, in tie-break order.
    pub names_file: PathBuf,
    /// Rows read from each stored profile. `None` reads all of them.
    pub profile_rows: Option<usize>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            trigrams_dir: PathBuf::from("resources/trigrams"),
            names_file: PathBuf::from("resources/languagecode_names.csv"),
            profile_rows: None,
        }
    }
}

impl Config {
    /// Parses a TOML document. `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(error::io(path))?;
        Self::from_toml_str(&text, path)
    }

    /// Loads configuration from the file and the environment.
    ///
    /// An explicit `path` must exist. Without one, `triglot.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_algorithm_override(std::env::var(ALGORITHM_ENV).ok())?;
        Ok(config)
    }

    /// Replaces the algorithm when an override is given.
    ///
    /// Unknown names are rejected rather than falling back to a default.
    pub fn apply_algorithm_override(&mut self, name: Option<String>) -> Result<()> {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            let algorithm: Algorithm = name.parse()?;
            debug!(%algorithm, "algorithm overridden");
            self.identify.algorithm = algorithm;
        }
        Ok(())
    }

    /// Checks the merged settings.
    pub fn validate(&self) -> Result<()> {
        self.identify.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triglot_types::{SettingsError, ValueMode};

    fn parse(text: &str) -> Result<Config> {
        Config::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_document_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.identify.line_limit, 100);
        assert_eq!(config.identify.algorithm, Algorithm::Cosine);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = parse(
            r#"
            [identify]
            algorithm = "cavnar-trenkle"
            value-mode = "real"

            [resources]
            profile-rows = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.identify.algorithm, Algorithm::CavnarTrenkle);
        assert_eq!(config.identify.value_mode, ValueMode::Real);
        assert_eq!(config.identify.line_limit, 100);
        assert_eq!(config.resources.profile_rows, Some(300));
        assert_eq!(config.resources.trigrams_dir, PathBuf::from("resources/trigrams"));
    }

    #[test]
    fn unknown_algorithm_in_file_is_rejected() {
        let err = parse("[identify]\nalgorithm = \"levenshtein\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn file_names_parse_like_env_names() {
        let config = parse("[identify]\nalgorithm = \"Cosine\"\nvalue-mode = \"REAL\"\n").unwrap();
        assert_eq!(config.identify.algorithm, Algorithm::Cosine);
        assert_eq!(config.identify.value_mode, ValueMode::Real);

        for name in ["Cavnar_Trenkle", "cavnar-trenkle", "CAVNARTRENKLE"] {
            let config = parse(&format!("[identify]\nalgorithm = \"{name}\"\n")).unwrap();
            let from_env: Algorithm = name.parse().unwrap();
            assert_eq!(config.identify.algorithm, from_env, "{name}");
        }
    }

    #[test]
    fn override_takes_priority() {
        let mut config = parse("[identify]\nalgorithm = \"jaccard\"\n").unwrap();

        config.apply_algorithm_override(None).unwrap();
        assert_eq!(config.identify.algorithm, Algorithm::Jaccard);

        config
            .apply_algorithm_override(Some("Cavnar_Trenkle".into()))
            .unwrap();
        assert_eq!(config.identify.algorithm, Algorithm::CavnarTrenkle);

        let err = config
            .apply_algorithm_override(Some("bogus".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Settings(SettingsError::UnknownAlgorithm { .. })
        ));
        assert_eq!(config.identify.algorithm, Algorithm::CavnarTrenkle);
    }

    #[test]
    fn zero_line_limit_fails_validation() {
        let config = parse("[identify]\nline-limit = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::Settings(SettingsError::ZeroLineLimit))
        ));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[identify]\ntrigram-limit = 40\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.identify.trigram_limit, 40);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(Some(missing.as_path())), Err(Error::Io { .. })));
    }
}

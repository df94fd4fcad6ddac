//! Trigram-based language identification.
//!
//! Text is reduced to a frequency profile of overlapping 3-code-point
//! windows, normalized, and scored against stored language profiles with a
//! selectable similarity metric.
//!
//! Pipeline:
//! - **Analyzer**: splits input into lines and lines into trigrams
//! - **Profile**: counts trigrams, normalizes, builds stored tables
//! - **Similarity**: cosine, weighted Jaccard and Cavnar-Trenkle scorers
//! - **Language**: picks the best language under a first-seen-wins rule
//! - **Store**: CSV profiles and the language names table
//!
//! ```
//! use triglot_core::{identify_lines, LanguageSet, Settings, TrigramProfile};
//!
//! let mut es = TrigramProfile::new();
//! es.add_line("el perro come en la casa");
//! es.normalize();
//!
//! let mut en = TrigramProfile::new();
//! en.add_line("the dog eats in the house");
//! en.normalize();
//!
//! let mut languages = LanguageSet::new();
//! languages.add("es", es).unwrap();
//! languages.add("en", en).unwrap();
//!
//! let best = identify_lines(["la casa del perro"], &languages, &Settings::default()).unwrap();
//! assert_eq!(languages.code(best.id), Some("es"));
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod language;
pub mod profile;
pub mod similarity;
pub mod store;

pub use config::{Config, ResourceConfig};
pub use error::{Error, Result};
pub use language::{identify_buffer, identify_lines, identify_path, LanguageProfile, LanguageSet};
pub use profile::{build, ProfileBuilder, ProfileRow, ProfileStats, TrigramProfile};
pub use similarity::{scorer_for, Scorer};
pub use store::{load_language_set, LanguageCatalog};
pub use triglot_types::{
    Algorithm, FrequencyValue, LangId, LanguageScore, Settings, SettingsError, Trigram, ValueMode,
};

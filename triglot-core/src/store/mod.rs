//! On-disk profile store.
//!
//! Layout:
//! - `<trigrams_dir>/<code>.csv`: one `"trigram","count"` row per trigram,
//!   most frequent first
//! - names file: one `"code","name"` row per language, in tie-break order

pub mod csv;
mod loader;
mod writer;

pub use loader::{
    load_language_set, load_names, load_profile, profile_path, LanguageCatalog, LanguageName,
    PROFILE_EXTENSION,
};
pub use writer::{format_count, register_language_name, save_profile};

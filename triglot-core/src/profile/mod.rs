//! Trigram frequency profiles.
//!
//! A profile is built per text by the extractor, optionally trimmed and
//! normalized, then compared against language profiles. Language profiles are
//! built once, ahead of time, by [`ProfileBuilder`].
//!
//! Storage:
//! - One `FxHashMap` from inline [`Trigram`](triglot_types::Trigram) keys to
//!   `(real, normalized)` pairs
//! - No shared scratch state: every profile owns everything it uses, so
//!   independent requests never interfere
//!
//! Threading:
//! - [`TrigramProfile`] is `Send + Sync`. Loaded language profiles are
//!   read-only and can be shared across any number of readers.

mod api;
mod builder;
mod normalize;
mod stats;
mod types;

pub use builder::{build, ProfileBuilder, ProfileRow};
pub use stats::ProfileStats;
pub use types::TrigramProfile;

//! Similarity scoring.
//!
//! Every scorer consumes a query profile and a language profile and returns a
//! score where **higher is always better**, so the comparator can treat them
//! interchangeably.
//!
//! - **Cosine**: dot product of normalized weights
//! - **Jaccard**: weighted intersection over union
//! - **Cavnar-Trenkle**: per-trigram distance mapped into `(0, 1]`

mod cavnar_trenkle;
mod cosine;
mod jaccard;

pub use cavnar_trenkle::CavnarTrenkle;
pub use cosine::Cosine;
pub use jaccard::Jaccard;

use crate::profile::TrigramProfile;
use triglot_types::{Algorithm, ValueMode};

/// A similarity metric between two trigram profiles.
///
/// Implementations are stateless. Adding a metric means adding a type that
/// implements this trait and a variant that selects it.
pub trait Scorer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Scores `query` against `language`. Higher is better.
    ///
    /// `mode` selects raw counts or normalized weights for both operands.
    /// Scorers never normalize implicitly.
    fn score(&self, query: &TrigramProfile, language: &TrigramProfile, mode: ValueMode) -> f32;
}

/// Returns the scorer implementing `algorithm`.
#[inline]
pub fn scorer_for(algorithm: Algorithm) -> &'static dyn Scorer {
    match algorithm {
        Algorithm::Cosine => &Cosine,
        Algorithm::Jaccard => &Jaccard,
        Algorithm::CavnarTrenkle => &CavnarTrenkle,
    }
}

/// Scores two profiles with the given algorithm.
#[inline]
pub fn score(
    algorithm: Algorithm,
    query: &TrigramProfile,
    language: &TrigramProfile,
    mode: ValueMode,
) -> f32 {
    scorer_for(algorithm).score(query, language, mode)
}

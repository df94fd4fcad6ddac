use super::Scorer;
use crate::profile::TrigramProfile;
use triglot_types::ValueMode;

/// Cosine similarity over normalized weights.
///
/// Both profiles must already be normalized; the result is then the plain dot
/// product. Raw counts are meaningless for an angle, so `mode` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Scorer for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn score(&self, query: &TrigramProfile, language: &TrigramProfile, _mode: ValueMode) -> f32 {
        debug_assert!(
            query.is_empty() || query.is_normalized(),
            "cosine needs a normalized query"
        );

        // Walk the smaller map, probe the larger one
        let (small, large) = if query.len() <= language.len() {
            (query, language)
        } else {
            (language, query)
        };

        let mut dot = 0.0f32;
        for (trigram, value) in small.iter() {
            if let Some(other) = large.get(trigram) {
                dot += value.normalized * other.normalized;
            }
        }
        dot
    }
}

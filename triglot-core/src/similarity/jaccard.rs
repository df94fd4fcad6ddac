use super::Scorer;
use crate::profile::TrigramProfile;
use triglot_types::ValueMode;

/// Weighted Jaccard index: `Σ min / (Σ A + Σ B - Σ min)`.
///
/// The intersection walks the query only. Two empty profiles divide zero by
/// zero and yield NaN, which never beats the comparator's baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl Scorer for Jaccard {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score(&self, query: &TrigramProfile, language: &TrigramProfile, mode: ValueMode) -> f32 {
        let mut intersection = 0.0f32;
        let mut query_total = 0.0f32;

        for (trigram, value) in query.iter() {
            let a = value.get(mode);
            query_total += a;
            if let Some(other) = language.get(trigram) {
                intersection += a.min(other.get(mode));
            }
        }

        let total = query_total + language.total(mode);
        intersection / (total - intersection)
    }
}

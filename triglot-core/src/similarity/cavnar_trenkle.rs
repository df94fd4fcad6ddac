use super::Scorer;
use crate::profile::TrigramProfile;
use triglot_types::ValueMode;

/// Distance charged for a query trigram the language never produced.
const MISSING_PENALTY: f32 = 1.0;

/// Cavnar-Trenkle style distance, inverted so that higher is better.
///
/// Every query trigram contributes `|a - b|` when the language has it and
/// [`MISSING_PENALTY`] otherwise. The summed distance `d` maps to
/// `1 / (1 + d)`, which lies in `(0, 1]` and equals 1 only for a perfect match.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavnarTrenkle;

impl Scorer for CavnarTrenkle {
    fn name(&self) -> &'static str {
        "cavnar-trenkle"
    }

    fn score(&self, query: &TrigramProfile, language: &TrigramProfile, mode: ValueMode) -> f32 {
        let mut distance = 0.0f32;
        for (trigram, value) in query.iter() {
            distance += match language.get(trigram) {
                Some(other) => (value.get(mode) - other.get(mode)).abs(),
                None => MISSING_PENALTY,
            };
        }
        1.0 / (1.0 + distance)
    }
}

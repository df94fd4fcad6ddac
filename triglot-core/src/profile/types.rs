//! Profile types.

use rustc_hash::FxHashMap;
use triglot_types::{FrequencyValue, Trigram, ValueMode};

/// Frequency profile of the trigrams of a text or a language.
///
/// Keys are unique trigrams; values hold the raw count and, once
/// [`normalize`](TrigramProfile::normalize) has run, the L2-normalized weight.
/// Any mutation of the raw counts marks the normalized weights stale.
#[derive(Debug, Clone, Default)]
pub struct TrigramProfile {
    pub(crate) entries: FxHashMap<Trigram, FrequencyValue>,
    pub(crate) normalized: bool,
}

impl TrigramProfile {
    /// Creates a new, empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty profile with room for `capacity` distinct trigrams.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            normalized: false,
        }
    }

    /// Returns the number of distinct trigrams.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the profile holds no trigrams.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the normalized weights reflect the current counts.
    #[inline(always)]
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Looks up the frequency of a trigram.
    #[inline(always)]
    pub fn get(&self, trigram: &Trigram) -> Option<FrequencyValue> {
        self.entries.get(trigram).copied()
    }

    /// Looks up a trigram given as text.
    pub fn get_str(&self, trigram: &str) -> Option<FrequencyValue> {
        Trigram::new(trigram).and_then(|t| self.get(&t))
    }

    /// Returns `true` if the trigram occurs in the profile.
    #[inline(always)]
    pub fn contains(&self, trigram: &Trigram) -> bool {
        self.entries.contains_key(trigram)
    }

    /// Iterates over all trigrams and their frequencies in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Trigram, &FrequencyValue)> + '_ {
        self.entries.iter()
    }

    /// Sums the field selected by `mode` over all trigrams.
    pub fn total(&self, mode: ValueMode) -> f32 {
        self.entries.values().map(|v| v.get(mode)).sum()
    }

    /// Removes every trigram, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.normalized = false;
    }
}

impl FromIterator<(Trigram, f32)> for TrigramProfile {
    fn from_iter<I: IntoIterator<Item = (Trigram, f32)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (trigram, real) in iter {
            profile.insert(trigram, real);
        }
        profile
    }
}

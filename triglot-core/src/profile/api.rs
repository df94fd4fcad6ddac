//! Public API for feeding text into a profile.

use crate::analyzer::trigram::extract_trigrams;
use crate::profile::types::TrigramProfile;
use triglot_types::{FrequencyValue, Trigram};

impl TrigramProfile {
    /// Adds every trigram of `line` with a count of 1.
    ///
    /// Lines shorter than 3 code points contribute nothing.
    #[inline]
    pub fn add_line(&mut self, line: &str) {
        self.add_line_weighted(line, 1.0);
    }

    /// Adds every trigram of `line`, each occurrence counting `weight`.
    pub fn add_line_weighted(&mut self, line: &str, weight: f32) {
        debug_assert!(weight >= 0.0, "trigram weights must be non-negative");

        let entries = &mut self.entries;
        let mut added = false;
        extract_trigrams(line, |trigram| {
            entries.entry(trigram).or_default().real += weight;
            added = true;
        });

        if added {
            self.normalized = false;
        }
    }

    /// Feeds up to `line_limit` lines into the profile.
    ///
    /// Every line received counts toward the limit, including lines too
    /// short to yield a trigram. Calls accumulate, so several texts can be
    /// combined into one profile. Returns the number of lines consumed.
    ///
    /// ```
    /// use triglot_core::TrigramProfile;
    ///
    /// let mut profile = TrigramProfile::new();
    /// let consumed = profile.extend_lines(["aaaa", "ab", "never read"], 2);
    ///
    /// assert_eq!(consumed, 2);
    /// assert_eq!(profile.len(), 1);
    /// assert_eq!(profile.get_str("aaa").unwrap().real, 2.0);
    /// ```
    pub fn extend_lines<I>(&mut self, lines: I, line_limit: usize) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.extend_lines_weighted(lines, line_limit, 1.0)
    }

    /// Like [`extend_lines`](Self::extend_lines) with a per-occurrence weight.
    pub fn extend_lines_weighted<I>(&mut self, lines: I, line_limit: usize, weight: f32) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut consumed = 0usize;
        for line in lines.into_iter().take(line_limit) {
            self.add_line_weighted(line.as_ref(), weight);
            consumed += 1;
        }
        consumed
    }

    /// Sets the raw count of a trigram, replacing any previous count.
    ///
    /// Used when loading stored profiles. Returns the previous count.
    pub fn insert(&mut self, trigram: Trigram, real: f32) -> Option<f32> {
        debug_assert!(real >= 0.0, "trigram counts must be non-negative");
        self.normalized = false;
        let previous = self.entries.insert(trigram, FrequencyValue::new(real));
        previous.map(|v| v.real)
    }
}

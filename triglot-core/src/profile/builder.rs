//! Offline profile building and frequency ordering.

use crate::profile::types::TrigramProfile;
use triglot_types::{FrequencyValue, Trigram};

/// One row of a built profile: a trigram and its raw count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRow {
    /// The trigram.
    pub trigram: Trigram,
    /// Raw occurrence count, possibly weighted.
    pub count: f32,
}

/// Orders by count descending, then trigram ascending.
#[inline(always)]
fn frequency_order(a: (&Trigram, f32), b: (&Trigram, f32)) -> std::cmp::Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

impl TrigramProfile {
    /// Returns the profile as rows sorted by count (descending), ties broken
    /// by ascending trigram so the output is reproducible.
    pub fn sorted_rows(&self) -> Vec<ProfileRow> {
        let mut rows: Vec<ProfileRow> = self
            .entries
            .iter()
            .map(|(trigram, value)| ProfileRow {
                trigram: *trigram,
                count: value.real,
            })
            .collect();

        rows.sort_unstable_by(|a, b| frequency_order((&a.trigram, a.count), (&b.trigram, b.count)));
        rows
    }

    /// Keeps only the `limit` most frequent trigrams, ties resolved by
    /// ascending trigram. A `limit` of 0 keeps everything.
    ///
    /// Dropping entries changes the norm, so normalized weights become stale.
    pub fn retain_top(&mut self, limit: usize) {
        if limit == 0 || self.entries.len() <= limit {
            return;
        }

        let mut ranked: Vec<(Trigram, FrequencyValue)> = self.entries.drain().collect();
        ranked.sort_unstable_by(|a, b| frequency_order((&a.0, a.1.real), (&b.0, b.1.real)));
        ranked.truncate(limit);

        self.entries.extend(ranked);
        self.normalized = false;
    }
}

/// Builds a language profile from a corpus.
///
/// The builder drives the extractor with no line limit and hands back a
/// sorted frequency table ready to be stored.
///
/// ```
/// use triglot_core::ProfileBuilder;
///
/// let mut builder = ProfileBuilder::new();
/// builder.add_lines(["abab", "bab"]);
/// let rows = builder.finish();
///
/// assert_eq!(rows[0].trigram.as_str(), "bab");
/// assert_eq!(rows[0].count, 2.0);
/// assert_eq!(rows[1].trigram.as_str(), "aba");
/// ```
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    profile: TrigramProfile,
    weight: f32,
    lines_read: u64,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// Creates a builder where every trigram occurrence counts 1.
    pub fn new() -> Self {
        Self {
            profile: TrigramProfile::with_capacity(4096),
            weight: 1.0,
            lines_read: 0,
        }
    }

    /// Creates a builder where every occurrence counts `weight`.
    pub fn with_weight(weight: f32) -> Self {
        debug_assert!(weight >= 0.0, "corpus weight must be non-negative");
        Self {
            weight,
            ..Self::new()
        }
    }

    /// Adds one corpus line.
    #[inline]
    pub fn add_line(&mut self, line: &str) {
        self.profile.add_line_weighted(line, self.weight);
        self.lines_read += 1;
    }

    /// Adds every line of an in-memory corpus.
    pub fn add_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref());
        }
    }

    /// Number of corpus lines consumed so far.
    #[inline(always)]
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// The profile accumulated so far.
    #[inline(always)]
    pub fn profile(&self) -> &TrigramProfile {
        &self.profile
    }

    /// Returns the sorted frequency table.
    pub fn finish(self) -> Vec<ProfileRow> {
        self.profile.sorted_rows()
    }
}

/// Builds a sorted frequency table from corpus lines in one call.
pub fn build<I>(corpus_lines: I) -> Vec<ProfileRow>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = ProfileBuilder::new();
    builder.add_lines(corpus_lines);
    builder.finish()
}

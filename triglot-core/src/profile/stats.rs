//! Statistics and ProfileStats.

use crate::profile::types::TrigramProfile;
use triglot_types::ValueMode;

/// A snapshot of profile statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    /// Number of distinct trigrams.
    pub distinct_trigrams: usize,
    /// Sum of all raw counts.
    pub total_occurrences: f64,
    /// Euclidean length of the raw counts.
    pub norm: f32,
    /// Whether normalized weights are current.
    pub normalized: bool,
}

impl TrigramProfile {
    /// Returns profile statistics.
    pub fn stats(&self) -> ProfileStats {
        ProfileStats {
            distinct_trigrams: self.len(),
            total_occurrences: f64::from(self.total(ValueMode::Real)),
            norm: self.norm(),
            normalized: self.is_normalized(),
        }
    }
}

impl ProfileStats {
    /// Average number of occurrences per distinct trigram.
    pub fn mean_count(&self) -> f64 {
        if self.distinct_trigrams == 0 {
            0.0
        } else {
            self.total_occurrences / self.distinct_trigrams as f64
        }
    }
}

impl core::fmt::Display for ProfileStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} trigrams, {} occurrences, norm {:.3}",
            self.distinct_trigrams, self.total_occurrences, self.norm
        )?;

        if self.normalized {
            write!(f, " (normalized)")?;
        }

        Ok(())
    }
}

//! L2 normalization.

use crate::profile::types::TrigramProfile;

impl TrigramProfile {
    /// Returns the Euclidean length of the raw counts.
    pub fn norm(&self) -> f32 {
        let sum_squares: f64 = self
            .entries
            .values()
            .map(|v| f64::from(v.real) * f64::from(v.real))
            .sum();
        sum_squares.sqrt() as f32
    }

    /// Rescales the profile to unit length.
    ///
    /// Sets `normalized = real / norm` for every trigram. An empty (or
    /// all-zero) profile has no direction; it is left untouched and this is
    /// not an error. Recomputes from the raw counts, so calling it twice
    /// gives the same weights.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }

        let inv_norm = 1.0 / f64::from(norm);
        for value in self.entries.values_mut() {
            value.normalized = (f64::from(value.real) * inv_norm) as f32;
        }
        self.normalized = true;
    }
}

//! Language profiles and the best-match comparator.

use crate::error::{Error, Result};
use crate::profile::TrigramProfile;
use crate::similarity::scorer_for;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use triglot_types::{LangId, LanguageScore, Settings};

/// A reference profile for one language.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// Language code, e.g. `"es"`.
    pub code: String,
    /// Normalized trigram profile of the language's corpus.
    pub profile: TrigramProfile,
}

impl LanguageProfile {
    /// Pairs a language code with its profile.
    pub fn new(code: impl Into<String>, profile: TrigramProfile) -> Self {
        Self {
            code: code.into(),
            profile,
        }
    }
}

/// Ordered collection of language profiles.
///
/// Order only matters for ties: the earliest language wins. A set is
/// immutable once loaded and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct LanguageSet {
    languages: Vec<LanguageProfile>,
    by_code: FxHashMap<String, LangId>,
}

impl LanguageSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a language and returns its id.
    ///
    /// Fails if the code is already in the set.
    pub fn push(&mut self, language: LanguageProfile) -> Result<LangId> {
        if self.by_code.contains_key(&language.code) {
            return Err(Error::DuplicateLanguage {
                code: language.code,
            });
        }

        let id = self.languages.len() as LangId;
        self.by_code.insert(language.code.clone(), id);
        self.languages.push(language);
        Ok(id)
    }

    /// Convenience wrapper around [`push`](Self::push).
    pub fn add(&mut self, code: impl Into<String>, profile: TrigramProfile) -> Result<LangId> {
        self.push(LanguageProfile::new(code, profile))
    }

    /// Number of languages.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if no language was added.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Language at position `id`.
    #[inline]
    pub fn get(&self, id: LangId) -> Option<&LanguageProfile> {
        self.languages.get(id as usize)
    }

    /// Language code for an id.
    #[inline]
    pub fn code(&self, id: LangId) -> Option<&str> {
        self.get(id).map(|l| l.code.as_str())
    }

    /// Looks up a language id by code.
    pub fn find(&self, code: &str) -> Option<LangId> {
        self.by_code.get(code).copied()
    }

    /// Iterates languages in set order.
    pub fn iter(&self) -> impl Iterator<Item = (LangId, &LanguageProfile)> + '_ {
        self.languages
            .iter()
            .enumerate()
            .map(|(id, l)| (id as LangId, l))
    }

    /// Returns the best-matching language for `profile`, or `None`.
    ///
    /// The profile must already be prepared for `settings`: normalized when
    /// [`Settings::needs_normalized`] is true. Scoring starts from a baseline
    /// of 0 and a language only replaces the current best on a strictly
    /// higher score, so the earliest of equally scored languages wins and
    /// nothing wins when every score is 0 (or NaN). An empty profile never
    /// matches.
    pub fn identify(&self, profile: &TrigramProfile, settings: &Settings) -> Option<LanguageScore> {
        if profile.is_empty() {
            return None;
        }
        debug_assert!(
            !settings.needs_normalized() || profile.is_normalized(),
            "query profile must be normalized for {}",
            settings.algorithm
        );

        let scorer = scorer_for(settings.algorithm);
        let mut best: Option<LanguageScore> = None;
        let mut best_score = 0.0f32;

        for (id, language) in self.iter() {
            let score = scorer.score(profile, &language.profile, settings.value_mode);
            debug!(
                language = %language.code,
                algorithm = scorer.name(),
                score,
                "compared"
            );

            if score > best_score {
                best_score = score;
                best = Some(LanguageScore::new(id, score));
            }
        }

        best
    }

    /// Returns up to `limit` candidates that beat the zero baseline, best
    /// first. Equal scores keep set order, so the first entry always agrees
    /// with [`identify`](Self::identify).
    pub fn rank(
        &self,
        profile: &TrigramProfile,
        settings: &Settings,
        limit: usize,
    ) -> Vec<LanguageScore> {
        if profile.is_empty() || limit == 0 {
            return Vec::new();
        }

        let scorer = scorer_for(settings.algorithm);
        let mut scratch: SmallVec<[LanguageScore; 32]> = SmallVec::new();

        for (id, language) in self.iter() {
            let score = scorer.score(profile, &language.profile, settings.value_mode);
            if score > 0.0 {
                scratch.push(LanguageScore::new(id, score));
            }
        }

        scratch.sort_unstable_by(|a, b| b.cmp(a));
        scratch.truncate(limit);
        scratch.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triglot_types::{Algorithm, ValueMode};

    const SPANISH: &str = "el perro come en la casa de la abuela";
    const ENGLISH: &str = "the dog eats in the house of the grandmother";

    fn normalized(text: &str) -> TrigramProfile {
        let mut profile = TrigramProfile::new();
        profile.add_line(text);
        profile.normalize();
        profile
    }

    fn es_en() -> LanguageSet {
        let mut set = LanguageSet::new();
        set.add("es", normalized(SPANISH)).unwrap();
        set.add("en", normalized(ENGLISH)).unwrap();
        set
    }

    #[test]
    fn identical_profile_wins_under_cosine() {
        let set = es_en();
        let result = set
            .identify(&normalized(SPANISH), &Settings::default())
            .expect("should match");

        assert_eq!(set.code(result.id), Some("es"));
        assert!((result.score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn every_algorithm_picks_the_right_language() {
        let set = es_en();
        let query = normalized("la casa del perro");
        for algorithm in Algorithm::ALL {
            for mode in [ValueMode::Real, ValueMode::Normalized] {
                let settings = Settings::new(algorithm, mode);
                let result = set.identify(&query, &settings).expect("should match");
                assert_eq!(set.code(result.id), Some("es"), "{algorithm}/{mode}");
            }
        }
    }

    #[test]
    fn empty_profile_never_matches() {
        let set = es_en();
        let empty = TrigramProfile::new();
        for algorithm in Algorithm::ALL {
            let settings = Settings::new(algorithm, ValueMode::Real);
            assert!(set.identify(&empty, &settings).is_none());
            assert!(set.rank(&empty, &settings, 10).is_empty());
        }
    }

    #[test]
    fn no_overlap_is_no_match() {
        let set = es_en();
        let query = normalized("zzzzqqqq");
        assert!(set.identify(&query, &Settings::default()).is_none());

        let jaccard = Settings::new(Algorithm::Jaccard, ValueMode::Normalized);
        assert!(set.identify(&query, &jaccard).is_none());
    }

    #[test]
    fn empty_set_is_no_match() {
        let set = LanguageSet::new();
        assert!(set.identify(&normalized(SPANISH), &Settings::default()).is_none());
    }

    #[test]
    fn tie_resolves_to_earliest() {
        let mut set = LanguageSet::new();
        set.add("first", normalized(SPANISH)).unwrap();
        set.add("second", normalized(SPANISH)).unwrap();
        set.add("other", normalized(ENGLISH)).unwrap();

        let query = normalized(SPANISH);
        for algorithm in Algorithm::ALL {
            let settings = Settings::new(algorithm, ValueMode::Normalized);
            let result = set.identify(&query, &settings).unwrap();
            assert_eq!(set.code(result.id), Some("first"), "{algorithm}");

            let ranked = set.rank(&query, &settings, 2);
            assert_eq!(ranked.len(), 2);
            assert_eq!(ranked[0], result);
            assert_eq!(set.code(ranked[1].id), Some("second"));
        }
    }

    #[test]
    fn rank_orders_by_score() {
        let mut set = LanguageSet::new();
        set.add("en", normalized(ENGLISH)).unwrap();
        set.add("es", normalized(SPANISH)).unwrap();
        set.add("xx", normalized("qqqq")).unwrap();

        let query = normalized("el perro de la casa of the house");
        let ranked = set.rank(&query, &Settings::default(), 10);

        // "xx" shares nothing and stays below the baseline
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| set.code(r.id) != Some("xx")));
        assert!(ranked[0].score >= ranked[1].score);
        assert_eq!(set.identify(&query, &Settings::default()), Some(ranked[0]));
        assert_eq!(set.rank(&query, &Settings::default(), 1).len(), 1);
        assert!(set.rank(&query, &Settings::default(), 0).is_empty());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut set = LanguageSet::new();
        assert_eq!(set.add("es", TrigramProfile::new()).unwrap(), 0);
        assert!(matches!(
            set.add("es", TrigramProfile::new()),
            Err(Error::DuplicateLanguage { code }) if code == "es"
        ));
        assert_eq!(set.len(), 1);
        assert_eq!(set.find("es"), Some(0));
        assert_eq!(set.find("en"), None);
    }

    #[test]
    fn language_set_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LanguageSet>();
    }
}

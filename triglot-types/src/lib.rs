//! Core types for the triglot language identifier.
//!
//! This crate provides the fundamental types that are shared between the
//! engine and its front ends. Keeping types separate ensures:
//!
//! - **Compact keys**: Trigrams are stored inline and hash without allocation
//! - **Cross-crate compatibility**: Core and CLI share the same settings
//! - **Clean boundaries**: No circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a language inside a language set.
///
/// Languages are addressed by their position in the set, so the first
/// language loaded is `0`, the second `1`, and so on.
pub type LangId = u32;

/// Score of one candidate language against a query profile.
///
/// Higher scores indicate better matches for every algorithm.
#[derive(Debug, Clone, Copy)]
pub struct LanguageScore {
    /// Position of the language in its set
    pub id: LangId,
    /// Similarity score (higher is better)
    pub score: f32,
}

impl PartialEq for LanguageScore {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.score == other.score
    }
}

impl Eq for LanguageScore {}

impl PartialOrd for LanguageScore {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageScore {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Higher score is greater; on equal scores the earlier language is greater,
        // so a descending sort keeps set order for ties.
        match self.score.total_cmp(&other.score) {
            core::cmp::Ordering::Equal => other.id.cmp(&self.id),
            ord => ord,
        }
    }
}

impl LanguageScore {
    /// Creates a new language score.
    #[inline(always)]
    pub const fn new(id: LangId, score: f32) -> Self {
        Self { id, score }
    }
}

impl fmt::Display for LanguageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lang={} score={:.4}", self.id, self.score)
    }
}

/// A trigram: exactly three consecutive Unicode code points.
///
/// The UTF-8 bytes are stored inline (at most 4 bytes per code point), so a
/// trigram:
/// - Is `Copy` and never allocates
/// - Hashes and compares by its byte span
/// - Orders lexicographically by bytes, which matches code point order
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trigram {
    len: u8,
    bytes: [u8; Trigram::MAX_BYTES],
}

impl Trigram {
    /// Maximum encoded length of a trigram (three 4-byte code points).
    pub const MAX_BYTES: usize = 12;

    /// Creates a trigram from a span that is known to hold three code points.
    ///
    /// The character count is only checked in debug builds; use
    /// [`Trigram::new`] for untrusted input.
    #[inline(always)]
    pub fn from_span(span: &str) -> Self {
        debug_assert_eq!(
            span.chars().count(),
            3,
            "trigram span must hold exactly 3 code points"
        );
        let src = span.as_bytes();
        let mut bytes = [0u8; Self::MAX_BYTES];
        bytes[..src.len()].copy_from_slice(src);
        Self {
            len: src.len() as u8,
            bytes,
        }
    }

    /// Creates a trigram from text, returning `None` unless it holds exactly
    /// three code points.
    ///
    /// ```
    /// use triglot_types::Trigram;
    ///
    /// assert_eq!(Trigram::new("ñan").unwrap().as_str(), "ñan");
    /// assert!(Trigram::new("ab").is_none());
    /// assert!(Trigram::new("abcd").is_none());
    /// ```
    pub fn new(text: &str) -> Option<Self> {
        if text.len() > Self::MAX_BYTES || text.chars().count() != 3 {
            return None;
        }
        Some(Self::from_span(text))
    }

    /// Returns the UTF-8 bytes of this trigram.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Returns the trigram as a string slice.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        // SAFETY: trigrams are only built by copying whole `&str` spans.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Returns the encoded length in bytes (3 to 12).
    #[inline(always)]
    pub const fn byte_len(&self) -> usize {
        self.len as usize
    }
}

impl PartialOrd for Trigram {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Trigram {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Debug for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Trigram").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frequency of one trigram in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrequencyValue {
    /// Raw occurrence count (float to allow weighted corpora).
    pub real: f32,
    /// L2-normalized weight. Only meaningful after the owning profile was
    /// normalized.
    pub normalized: f32,
}

impl FrequencyValue {
    /// Creates a value with the given raw count and no normalized weight.
    #[inline(always)]
    pub const fn new(real: f32) -> Self {
        Self {
            real,
            normalized: 0.0,
        }
    }

    /// Returns the field selected by `mode`.
    #[inline(always)]
    pub const fn get(self, mode: ValueMode) -> f32 {
        match mode {
            ValueMode::Normalized => self.normalized,
            ValueMode::Real => self.real,
        }
    }
}

/// Similarity algorithm used to compare profiles.
///
/// Names are parsed the same way everywhere (config file, environment,
/// command line): case-insensitive, `-` or `_` separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Algorithm {
    /// Dot product of L2-normalized vectors
    #[default]
    Cosine,
    /// Weighted Jaccard index
    Jaccard,
    /// Out-of-place distance turned into a similarity
    CavnarTrenkle,
}

impl Algorithm {
    /// Every algorithm, in display order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Cosine,
        Algorithm::Jaccard,
        Algorithm::CavnarTrenkle,
    ];

    /// Canonical configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Cosine => "cosine",
            Algorithm::Jaccard => "jaccard",
            Algorithm::CavnarTrenkle => "cavnar-trenkle",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Algorithm::Cosine),
            "jaccard" => Ok(Algorithm::Jaccard),
            "cavnar-trenkle" | "cavnar_trenkle" | "cavnartrenkle" => Ok(Algorithm::CavnarTrenkle),
            _ => Err(SettingsError::UnknownAlgorithm { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SettingsError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Which field of a [`FrequencyValue`] the scorers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ValueMode {
    /// L2-normalized weights
    #[default]
    Normalized,
    /// Raw occurrence counts
    Real,
}

impl ValueMode {
    /// Canonical configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            ValueMode::Normalized => "normalized",
            ValueMode::Real => "real",
        }
    }
}

impl fmt::Display for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalized" | "normalised" => Ok(ValueMode::Normalized),
            "real" | "raw" => Ok(ValueMode::Real),
            _ => Err(SettingsError::UnknownValueMode { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for ValueMode {
    type Error = SettingsError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Errors in identification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The algorithm name is not one of the supported algorithms.
    UnknownAlgorithm {
        /// The name that was given.
        name: String,
    },
    /// The value mode name is not `normalized` or `real`.
    UnknownValueMode {
        /// The name that was given.
        name: String,
    },
    /// The line limit must allow at least one line.
    ZeroLineLimit,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownAlgorithm { name } => {
                write!(
                    f,
                    "unknown algorithm '{}' (expected cosine, jaccard or cavnar-trenkle)",
                    name
                )
            }
            SettingsError::UnknownValueMode { name } => {
                write!(
                    f,
                    "unknown value mode '{}' (expected normalized or real)",
                    name
                )
            }
            SettingsError::ZeroLineLimit => write!(f, "line limit must be at least 1"),
        }
    }
}

impl core::error::Error for SettingsError {}

/// Identification settings.
///
/// One value is threaded through every comparison call; there is no global
/// state. All fields are always present even when the selected algorithm
/// ignores some of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Similarity algorithm.
    pub algorithm: Algorithm,
    /// Field read by Jaccard and Cavnar-Trenkle. Cosine always reads
    /// normalized weights.
    pub value_mode: ValueMode,
    /// Maximum number of input lines fed to the extractor (at least 1).
    pub line_limit: u32,
    /// Maximum number of distinct input trigrams kept for scoring, most
    /// frequent first. `0` keeps all of them.
    pub trigram_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Cosine,
            value_mode: ValueMode::Normalized,
            line_limit: Self::DEFAULT_LINE_LIMIT,
            trigram_limit: 0,
        }
    }
}

impl Settings {
    /// Default number of lines read from an input.
    pub const DEFAULT_LINE_LIMIT: u32 = 100;

    /// Creates settings for the given algorithm and value mode with default
    /// limits.
    pub const fn new(algorithm: Algorithm, value_mode: ValueMode) -> Self {
        Self {
            algorithm,
            value_mode,
            line_limit: Self::DEFAULT_LINE_LIMIT,
            trigram_limit: 0,
        }
    }

    /// Returns `true` when the selected algorithm reads normalized weights,
    /// so the query profile has to be normalized before scoring.
    #[inline(always)]
    pub const fn needs_normalized(&self) -> bool {
        matches!(self.algorithm, Algorithm::Cosine)
            || matches!(self.value_mode, ValueMode::Normalized)
    }

    /// Checks that the limits are usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.line_limit == 0 {
            return Err(SettingsError::ZeroLineLimit);
        }
        Ok(())
    }
}

//! Classification entry points.
//!
//! Each call builds its own query profile, prepares it for the selected
//! algorithm and hands it to [`LanguageSet::identify`]. Unavailable input is
//! not an error: it is logged and reported as no match.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};
use triglot_types::{LanguageScore, Settings};

use crate::analyzer::lines::{buffer_lines, for_each_line};
use crate::language::set::LanguageSet;
use crate::profile::TrigramProfile;

/// Trims and normalizes a freshly extracted profile according to `settings`.
fn prepare(profile: &mut TrigramProfile, settings: &Settings) {
    profile.retain_top(settings.trigram_limit as usize);
    if settings.needs_normalized() {
        profile.normalize();
    }
}

/// Builds a query profile from at most `settings.line_limit` lines.
pub fn query_profile<I>(lines: I, settings: &Settings) -> TrigramProfile
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut profile = TrigramProfile::new();
    let consumed = profile.extend_lines(lines, settings.line_limit as usize);
    prepare(&mut profile, settings);
    debug!(lines = consumed, trigrams = profile.len(), "query profile built");
    profile
}

/// Builds a query profile from a raw text buffer.
///
/// Returns `None` for an empty buffer. Whitespace is content: indentation
/// trigrams are part of code profiles.
pub fn query_profile_from_buffer(text: &str, settings: &Settings) -> Option<TrigramProfile> {
    if text.is_empty() {
        warn!("input buffer is empty");
        return None;
    }
    Some(query_profile(buffer_lines(text), settings))
}

/// Builds a query profile from the first `settings.line_limit` lines of a
/// file. The file is streamed, never read whole.
///
/// Returns `None` if the file cannot be opened or read.
pub fn query_profile_from_path(path: &Path, settings: &Settings) -> Option<TrigramProfile> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open input");
            return None;
        }
    };

    let mut profile = TrigramProfile::new();
    let read = for_each_line(
        BufReader::new(file),
        settings.line_limit as usize,
        |line| profile.add_line(line),
    );

    match read {
        Ok(lines) => {
            prepare(&mut profile, settings);
            debug!(
                path = %path.display(),
                lines,
                trigrams = profile.len(),
                "query profile built"
            );
            Some(profile)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read input");
            None
        }
    }
}

/// Identifies the language of a sequence of lines.
pub fn identify_lines<I>(lines: I, languages: &LanguageSet, settings: &Settings) -> Option<LanguageScore>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    languages.identify(&query_profile(lines, settings), settings)
}

/// Identifies the language of a raw text buffer such as pasted text.
pub fn identify_buffer(text: &str, languages: &LanguageSet, settings: &Settings) -> Option<LanguageScore> {
    let profile = query_profile_from_buffer(text, settings)?;
    languages.identify(&profile, settings)
}

/// Identifies the language of a text file.
pub fn identify_path(path: &Path, languages: &LanguageSet, settings: &Settings) -> Option<LanguageScore> {
    let profile = query_profile_from_path(path, settings)?;
    languages.identify(&profile, settings)
}

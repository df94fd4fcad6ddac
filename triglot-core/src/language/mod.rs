//! Language identification.
//!
//! - **Set**: ordered reference profiles and the best-match comparator
//! - **Classify**: per-request pipelines from lines, buffers and files

pub mod classify;
mod set;

pub use classify::{identify_buffer, identify_lines, identify_path, query_profile};
pub use set::{LanguageProfile, LanguageSet};

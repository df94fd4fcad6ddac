//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Trigram**: Extracts 3-code-point sequences from a line
//! - **Lines**: Splits raw buffers and files into extractor-ready lines

pub mod lines;
pub mod trigram;

pub use lines::{buffer_lines, for_each_line, read_file_lines, read_lines, BufferLines};
pub use trigram::{extract_trigrams, utf8_char_len};

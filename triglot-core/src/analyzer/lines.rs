//! Line sources.
//!
//! The extractor consumes lines with their separators already stripped.
//! This module turns the two kinds of raw input into such lines:
//!
//! - **Buffers** (pasted text, stdin): split on `\n`, one trailing `\r`
//!   removed, blank lines skipped
//! - **Readers** (files): read lazily up to a line limit, one trailing `\r`
//!   removed, invalid UTF-8 replaced, blank lines kept
//!
//! Buffer splitting applies no line limit; the extractor enforces it. File
//! reading takes the same limit only so it never reads past what the
//! extractor would consume.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memchr::memchr;

/// Removes a single trailing carriage return.
#[inline(always)]
pub fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Iterator over the non-blank lines of a buffer.
///
/// Created by [`buffer_lines`].
#[derive(Debug, Clone)]
pub struct BufferLines<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for BufferLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let start = self.pos;
            let end = memchr(b'\n', &bytes[start..]).map_or(bytes.len(), |i| start + i);
            self.pos = end + 1;

            let line = strip_carriage_return(&self.text[start..end]);
            if !line.is_empty() {
                return Some(line);
            }
        }

        None
    }
}

/// Splits a raw buffer into lines, skipping blank ones.
///
/// ```
/// use triglot_core::analyzer::lines::buffer_lines;
///
/// let lines: Vec<&str> = buffer_lines("hola\r\n\r\nmundo\n").collect();
/// assert_eq!(lines, vec!["hola", "mundo"]);
/// ```
pub fn buffer_lines(text: &str) -> BufferLines<'_> {
    BufferLines { text, pos: 0 }
}

/// Reads up to `limit` lines from `reader`, calling `f` for each one.
///
/// Lines are decoded lossily so a stray invalid byte never aborts a read.
/// Returns the number of lines delivered.
pub fn for_each_line<R, F>(mut reader: R, limit: usize, mut f: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::with_capacity(256);
    let mut count = 0usize;

    while count < limit {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        f(&String::from_utf8_lossy(&buf));
        count += 1;
    }

    Ok(count)
}

/// Reads up to `limit` lines from `reader` into owned strings.
pub fn read_lines<R: BufRead>(reader: R, limit: usize) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for_each_line(reader, limit, |line| lines.push(line.to_owned()))?;
    Ok(lines)
}

/// Opens `path` and reads up to `limit` lines from it.
pub fn read_file_lines<P: AsRef<Path>>(path: P, limit: usize) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    read_lines(BufReader::new(file), limit)
}

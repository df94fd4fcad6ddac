//! Minimal CSV codec for profile and name tables.
//!
//! Format:
//! - One record per line, `\n` separated, a trailing `\r` tolerated
//! - Fields separated by `,`, optionally wrapped in `"`
//! - Inside quotes `""` is a literal quote
//! - Writers always quote, so trigrams holding `,` or `"` survive
//!
//! Quoted fields never span lines.

use std::io::{self, Write};

use memchr::memchr;
use smallvec::SmallVec;

use crate::analyzer::lines::strip_carriage_return;

/// Fields of one record. Tables here have two columns.
pub type Fields = SmallVec<[String; 2]>;

/// Splits one line into fields.
pub fn parse_record(line: &str) -> Result<Fields, &'static str> {
    let bytes = line.as_bytes();
    let mut fields = Fields::new();
    let mut pos = 0usize;

    loop {
        if bytes.get(pos) != Some(&b'"') {
            match memchr(b',', &bytes[pos..]) {
                Some(i) => {
                    fields.push(line[pos..pos + i].to_owned());
                    pos += i + 1;
                    continue;
                }
                None => {
                    fields.push(line[pos..].to_owned());
                    return Ok(fields);
                }
            }
        }

        let mut field = String::new();
        let mut cursor = pos + 1;
        loop {
            let quote = memchr(b'"', &bytes[cursor..])
                .map(|i| cursor + i)
                .ok_or("unterminated quoted field")?;
            field.push_str(&line[cursor..quote]);

            if bytes.get(quote + 1) == Some(&b'"') {
                field.push('"');
                cursor = quote + 2;
            } else {
                pos = quote + 1;
                break;
            }
        }
        fields.push(field);

        match bytes.get(pos) {
            None => return Ok(fields),
            Some(b',') => pos += 1,
            Some(_) => return Err("unexpected character after closing quote"),
        }
    }
}

/// Writes one record, quoting every field.
pub fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        out.write_all(b"\"")?;

        let mut rest = field.as_bytes();
        while let Some(q) = memchr(b'"', rest) {
            out.write_all(&rest[..=q])?;
            out.write_all(b"\"")?;
            rest = &rest[q + 1..];
        }
        out.write_all(rest)?;
        out.write_all(b"\"")?;
    }
    out.write_all(b"\n")
}

/// A parsed record and its 1-based line number.
#[derive(Debug)]
pub struct Record {
    /// 1-based line number in the table.
    pub line: usize,
    /// Parsed fields, or why the line is malformed.
    pub fields: Result<Fields, &'static str>,
}

/// Iterator over the non-blank records of a table.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let start = self.pos;
            let end = memchr(b'\n', &bytes[start..]).map_or(bytes.len(), |i| start + i);
            self.pos = end + 1;
            self.line += 1;

            let line = strip_carriage_return(&self.text[start..end]);
            if line.is_empty() {
                continue;
            }
            return Some(Record {
                line: self.line,
                fields: parse_record(line),
            });
        }

        None
    }
}

/// Iterates the records of a whole table.
pub fn records(text: &str) -> Records<'_> {
    Records {
        text,
        pos: 0,
        line: 0,
    }
}

//! Split ABC notation text into tune records.
//!
//! A tune starts at every line beginning with `X:` and runs until the next
//! such line or the end of the file. Lines before the first `X:` belong to
//! no tune and are dropped. The `T:`, `R:`, `M:` and `K:` headers are lifted
//! into the record; every line of the tune stays in its body verbatim.

use std::path::Path;

use tunebook_core::{HeaderField, NewTune};

use crate::error::{IngestError, IngestResult};

/// Line prefix that opens a new tune.
pub const START_MARKER: &str = "X:";

/// Read an ABC file and parse every tune in it.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; only a
/// failure to read the file is an error.
pub fn parse_file(path: &Path, book: i64) -> IngestResult<Vec<NewTune>> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        book,
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let tunes = parse_tunes(&text, book, &source_name);
    log::debug!(
        "Parsed {} tune(s) from {} (book {})",
        tunes.len(),
        path.display(),
        book
    );
    Ok(tunes)
}

/// Parse the text of one file. `\n`, `\r\n` and a lone `\r` all end a line.
pub fn parse_tunes(text: &str, book: i64, source_name: &str) -> Vec<NewTune> {
    parse_lines(Lines { rest: text }, book, source_name)
}

/// Line iterator that accepts every common line ending.
///
/// A trailing terminator does not produce a final empty line.
struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(end) = self.rest.find(|c: char| c == '\n' || c == '\r') else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];
        Some(line)
    }
}

/// Parse an ordered sequence of lines (without their line terminators).
pub fn parse_lines<'a, I>(lines: I, book: i64, source_name: &str) -> Vec<NewTune>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut splitter = TuneSplitter::new(book, source_name);
    for line in lines {
        splitter.push(line);
    }
    splitter.finish()
}

/// Single-pass accumulator for the tune currently being read.
#[derive(Debug)]
struct TuneSplitter<'a> {
    book: i64,
    source_name: &'a str,
    current: Option<NewTune>,
    body: Vec<&'a str>,
    done: Vec<NewTune>,
}

impl<'a> TuneSplitter<'a> {
    fn new(book: i64, source_name: &'a str) -> Self {
        Self {
            book,
            source_name,
            current: None,
            body: Vec::new(),
            done: Vec::new(),
        }
    }

    fn push(&mut self, line: &'a str) {
        if let Some(reference) = line.strip_prefix(START_MARKER) {
            self.flush();
            self.current = Some(NewTune::new(
                self.book,
                self.source_name,
                reference.trim(),
            ));
            self.body.push(line);
            return;
        }

        let Some(tune) = self.current.as_mut() else {
            return;
        };
        self.body.push(line);
        if let Some((field, value)) = HeaderField::parse_line(line) {
            tune.set_header_if_unset(field, value);
        }
    }

    fn flush(&mut self) {
        if let Some(mut tune) = self.current.take() {
            tune.body = self.body.join("\n");
            self.done.push(tune);
        }
        self.body.clear();
    }

    fn finish(mut self) -> Vec<NewTune> {
        self.flush();
        self.done
    }
}

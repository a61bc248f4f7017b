//! Indented code sample extraction.
//!
//! Documentation marks samples by indenting them four spaces, with the
//! block opened by a blank line. Consecutive indented paragraphs separated
//! only by blank lines belong to the same sample; the first prose line ends
//! it.

use std::iter::Enumerate;
use std::str::Split;

/// Indentation that marks a line as code.
pub const INDENT_WIDTH: usize = 4;

const INDENT: &str = "    ";

/// A contiguous, de-indented block of code taken from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Code with the indentation removed; every line ends with `\n`.
    pub code: String,
    /// 1-based line of the first code line in the source document.
    pub line: usize,
    /// 0-based position of this snippet within its document.
    pub index: usize,
}

/// Lazily extract snippets from `text`.
pub fn extract(text: &str) -> Snippets<'_> {
    Snippets::new(text)
}

/// Forward-only scanner over a document's lines.
///
/// Holds at most one partially accumulated snippet. Once exhausted it stays
/// exhausted.
pub struct Snippets<'a> {
    lines: Enumerate<Split<'a, char>>,
    accumulator: String,
    start_line: usize,
    last_was_blank: bool,
    emitted: usize,
    finished: bool,
}

impl<'a> Snippets<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate(),
            accumulator: String::new(),
            start_line: 0,
            last_was_blank: true,
            emitted: 0,
            finished: false,
        }
    }

    /// Hand out the accumulated code, if any, and start over.
    ///
    /// A buffer holding nothing but whitespace is dropped.
    fn flush(&mut self) -> Option<Snippet> {
        if self.accumulator.is_empty() {
            return None;
        }
        let code = std::mem::take(&mut self.accumulator);
        if code.trim().is_empty() {
            return None;
        }
        let snippet = Snippet {
            code,
            line: self.start_line,
            index: self.emitted,
        };
        self.emitted += 1;
        Some(snippet)
    }
}

impl Iterator for Snippets<'_> {
    type Item = Snippet;

    fn next(&mut self) -> Option<Snippet> {
        if self.finished {
            return None;
        }

        while let Some((idx, line)) = self.lines.next() {
            if line.is_empty() {
                self.last_was_blank = true;
                continue;
            }

            if line.starts_with(INDENT) && (!self.accumulator.is_empty() || self.last_was_blank) {
                if self.accumulator.is_empty() {
                    self.start_line = idx + 1;
                }
                self.accumulator.push_str(&line[INDENT_WIDTH..]);
                self.accumulator.push('\n');
                self.last_was_blank = false;
                continue;
            }

            // Prose: closes any open block and is itself discarded
            self.last_was_blank = false;
            if let Some(snippet) = self.flush() {
                return Some(snippet);
            }
        }

        self.finished = true;
        self.flush()
    }
}

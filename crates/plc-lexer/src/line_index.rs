//! Newline index for offset to line/column recovery.
//!
//! Built once per source in a single pass. Lookups binary-search the
//! recorded line breaks, so locating every token of a file costs
//! O(T log L) rather than rescanning the text per token.

use crate::token::SourceLocation;

/// Byte offsets of every `\n` in a source text.
///
/// When the text does not end in `\n`, a boundary entry equal to the text
/// length is appended so the final line is terminated as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    breaks: Vec<usize>,
    /// Number of real `\n` entries in `breaks` (excludes the boundary).
    newlines: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut breaks: Vec<usize> = source
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| i)
            .collect();
        let newlines = breaks.len();
        if !source.ends_with('\n') {
            breaks.push(source.len());
        }
        Self { breaks, newlines }
    }

    /// Line-break offsets, including the trailing boundary entry if any.
    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    /// Number of lines, counting an unterminated final line.
    pub fn line_count(&self) -> usize {
        self.breaks.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        self.breaks[..self.newlines].partition_point(|&nl| nl < offset)
    }

    /// Zero-based line and column of `offset`.
    ///
    /// On the first line the column is the offset itself; elsewhere it is
    /// the distance from the character after the previous `\n`.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let line = self.line(offset);
        let column = match line {
            0 => offset,
            _ => offset - (self.breaks[line - 1] + 1),
        };
        SourceLocation::new(line, column)
    }

    /// Byte offset at which `line` begins, if the line exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ if line <= self.newlines => Some(self.breaks[line - 1] + 1),
            _ => None,
        }
    }
}

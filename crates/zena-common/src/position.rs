//! Line/column positions, derived from byte spans via a `LineMap`.
//!
//! Diagnostics carry byte offsets (`Span`) internally; a `LineMap` converts
//! those into human-facing `{line, column}` pairs only when a diagnostic is
//! about to be reported. This keeps the hot compiler paths working in plain
//! `u32` byte offsets.

use crate::span::Span;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (counted in UTF-8 bytes, not code points).
    pub column: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A fully resolved source location, attached to a `Diagnostic` once its
/// byte span has been converted via a `LineMap`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub line: u32,
    pub column: u32,
}

/// Maps byte offsets within one source file to 1-based line/column pairs.
///
/// Built once per module (it scans the source text for `\n` bytes), then
/// reused for every diagnostic raised against that module.
#[derive(Clone, Debug)]
pub struct LineMap {
    /// Byte offset of the start of each line; `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset as u32 + 1);
            }
        }
        LineMap { line_starts }
    }

    /// Convert a byte offset to a 1-based `Position`.
    pub fn position(&self, offset: u32) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_index];
        Position {
            line: line_index as u32 + 1,
            column: offset.saturating_sub(line_start) + 1,
        }
    }

    pub fn range(&self, span: Span) -> Range {
        Range {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }

    pub fn location(&self, file: &str, span: Span) -> SourceLocation {
        let pos = self.position(span.start);
        SourceLocation {
            file: file.to_string(),
            start: span.start,
            length: span.len(),
            line: pos.line,
            column: pos.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_starts_at_one_one() {
        let map = LineMap::new("abc\ndef\n");
        assert_eq!(map.position(0), Position { line: 1, column: 1 });
    }

    #[test]
    fn offset_after_newline_is_next_line() {
        let map = LineMap::new("abc\ndef\n");
        assert_eq!(map.position(4), Position { line: 2, column: 1 });
        assert_eq!(map.position(6), Position { line: 2, column: 3 });
    }

    #[test]
    fn range_spans_two_positions() {
        let map = LineMap::new("let x = 1;\nlet y = 2;");
        let range = map.range(Span::new(11, 14));
        assert_eq!(range.start, Position { line: 2, column: 1 });
        assert_eq!(range.end, Position { line: 2, column: 4 });
    }
}

//! Source ranges.
//!
//! A `TextRange` is used both for byte offsets (half-open `[start, end)`) and
//! for line spans in the incremental symbol table (inclusive on both ends).
//! Which reading applies is decided by the owner of the range.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The range of the global scope: covers every position.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: 0,
            end: u32::MAX,
        }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start == 0 && self.end == u32::MAX
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open containment, for byte offsets.
    #[must_use]
    pub const fn contains(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Inclusive containment, for line spans.
    #[must_use]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Inclusive overlap test, for line spans.
    #[must_use]
    pub const fn overlaps_lines(&self, start_line: u32, end_line: u32) -> bool {
        self.start <= end_line && self.end >= start_line
    }
}

#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod tests;

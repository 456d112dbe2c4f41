use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SpliceError, SpliceResult};

/// A half-open range of 0-based line indices, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// How boundaries that fall outside the file are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bounds {
    /// Reject any range that does not satisfy `start <= end <= line_count`
    #[default]
    Strict,
    /// Clamp both boundaries to the line count and splice whatever results.
    /// A reversed range duplicates the lines between `end` and `start`.
    Clamp,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a range from inclusive 1-based line numbers, as shown by editors.
    ///
    /// `from_one_based(103, 186)` covers the same lines as `new(102, 186)`.
    /// `last == first - 1` yields an empty range, i.e. an insertion before `first`.
    pub fn from_one_based(first: usize, last: usize) -> SpliceResult<Self> {
        if first == 0 {
            return Err(SpliceError::invalid_argument(
                "1-based line numbers start at 1",
            ));
        }
        if last < first - 1 {
            return Err(SpliceError::invalid_argument(format!(
                "last line {} comes before first line {}",
                last, first
            )));
        }
        Ok(Self::new(first - 1, last))
    }

    /// Number of lines covered; zero for empty or reversed ranges
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// Resolve the range against a file of `line_count` lines.
    ///
    /// Returns the head length and the index where the tail starts.
    pub fn resolve(&self, line_count: usize, bounds: Bounds) -> SpliceResult<(usize, usize)> {
        match bounds {
            Bounds::Strict => {
                if self.is_reversed() || self.end > line_count {
                    return Err(SpliceError::invalid_range(self.start, self.end, line_count));
                }
                Ok((self.start, self.end))
            }
            Bounds::Clamp => Ok((self.start.min(line_count), self.end.min(line_count))),
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

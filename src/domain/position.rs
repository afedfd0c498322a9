use crate::error::JumpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A row/column location in source text.
///
/// Rows and columns are zero-based. Points order lexicographically: row first,
/// then column.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Parses `ROW:COLUMN`, e.g. `3:14`.
impl FromStr for Point {
    type Err = JumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || JumpError::argument(format!("expected ROW:COLUMN, got '{}'", s));
        let (row, column) = s.split_once(':').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let column = column.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(row, column))
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            row: u32::try_from(point.row).unwrap_or(u32::MAX),
            column: u32::try_from(point.column).unwrap_or(u32::MAX),
        }
    }
}

/// The `[start, end]` range a syntax node covers. `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    /// Build a span, swapping the endpoints if they arrive reversed.
    pub fn new(a: Point, b: Point) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this span (boundaries inclusive).
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Exact span equality: both boundaries match on row and column.
///
/// Navigation moves only between nodes whose spans differ under this test.
pub fn spans_equal(a: &Span, b: &Span) -> bool {
    a.start == b.start && a.end == b.end
}

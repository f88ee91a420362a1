use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of the input table
// ---------------------------------------------------------------------------

/// One row of the input table: column name → raw cell text.
///
/// Empty and null cells are simply absent, so `get` returning `None` covers
/// both "column missing" and "cell empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    /// Build a record from `(column, value)` pairs, dropping empty values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Record { cells }
    }

    /// Raw text of a cell, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded input
// ---------------------------------------------------------------------------

/// The parsed input table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in header order (first appearance order for JSON).
    pub columns: Vec<String>,
    /// All rows, in file order.
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Table { columns, records }
    }

    /// Whether the header names `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Point / FrontierPoint
// ---------------------------------------------------------------------------

/// A trial reduced to the two plotted metrics. `x` and `y` are always finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl Point {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Point {
            x,
            y,
            label: label.into(),
        }
    }

    /// `self` dominates `other` when it is no worse on both axes
    /// (lower-or-equal x, higher-or-equal y) and strictly better on one.
    pub fn dominates(&self, other: &Point) -> bool {
        self.x <= other.x && self.y >= other.y && (self.x < other.x || self.y > other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:?})", self.x, self.y, self.label)
    }
}

/// A point that lies on the Pareto frontier.
///
/// Only the extractor in [`crate::pareto`] creates these, so a sequence of
/// them is always strictly increasing in x and non-decreasing in y.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontierPoint(Point);

impl FrontierPoint {
    pub(crate) fn new(point: Point) -> Self {
        FrontierPoint(point)
    }

    pub fn point(&self) -> &Point {
        &self.0
    }
}

impl Deref for FrontierPoint {
    type Target = Point;

    fn deref(&self) -> &Point {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Analysis – what presentation receives
// ---------------------------------------------------------------------------

/// Both output sequences of one run: every valid point (input order) and the
/// frontier (ascending x).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub points: Vec<Point>,
    pub frontier: Vec<FrontierPoint>,
}

impl Analysis {
    /// Whether `point` (by value) is one of the frontier points.
    pub fn on_frontier(&self, point: &Point) -> bool {
        self.frontier.iter().any(|f| f.point() == point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_drops_empty_cells() {
        let rec = Record::from_pairs([("a", "1"), ("b", ""), ("c", "x")]);
        assert_eq!(rec.get("a"), Some("1"));
        assert_eq!(rec.get("b"), None);
        assert_eq!(rec.get("missing"), None);
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn domination_requires_one_strict_axis() {
        let a = Point::new(1.0, 0.8, "a");
        let b = Point::new(2.0, 0.8, "b");
        let c = Point::new(1.0, 0.8, "c");
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
    }

    #[test]
    fn table_reports_columns() {
        let table = Table::new(vec!["x".into(), "y".into()], vec![Record::default()]);
        assert!(table.has_column("x"));
        assert!(!table.has_column("label"));
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}

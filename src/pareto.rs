use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ColumnSelection;
use crate::data::filter::extract_points;
use crate::data::model::{Analysis, FrontierPoint, Point, Table};
use crate::error::ParetoError;

// ---------------------------------------------------------------------------
// Tie-break policy
// ---------------------------------------------------------------------------

/// Which point survives when several share both x and y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The point seen last in input order wins.
    #[default]
    Last,
    /// The point seen first in input order wins.
    First,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Last => write!(f, "last"),
            TieBreak::First => write!(f, "first"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last" => Ok(TieBreak::Last),
            "first" => Ok(TieBreak::First),
            other => Err(format!("unknown tie-break '{other}' (expected 'first' or 'last')")),
        }
    }
}

// ---------------------------------------------------------------------------
// Best-per-x reduction
// ---------------------------------------------------------------------------

/// Map key grouping points by exact x.  `-0.0` is folded into `0.0` so the
/// grouping follows float equality, and `total_cmp` orders the (finite) keys.
#[derive(Debug, Clone, Copy)]
struct XKey(f64);

impl XKey {
    fn new(x: f64) -> Self {
        XKey(if x == 0.0 { 0.0 } else { x })
    }
}

impl PartialEq for XKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for XKey {}

impl PartialOrd for XKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for XKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Keep the best point for every distinct x, returned in ascending x order.
///
/// Each survivor carries the x first seen for its group, which only differs
/// from its own x when `-0.0` and `0.0` meet.
pub fn best_per_x(points: &[Point], tie_break: TieBreak) -> Vec<Point> {
    let mut best: BTreeMap<XKey, (f64, &Point)> = BTreeMap::new();

    for point in points {
        best.entry(XKey::new(point.x))
            .and_modify(|(_, current)| {
                let replace = match tie_break {
                    TieBreak::Last => point.y >= current.y,
                    TieBreak::First => point.y > current.y,
                };
                if replace {
                    *current = point;
                }
            })
            .or_insert((point.x, point));
    }

    best.into_values()
        .map(|(x, point)| Point { x, ..point.clone() })
        .collect()
}

// ---------------------------------------------------------------------------
// Envelope sweep
// ---------------------------------------------------------------------------

/// Pareto frontier with the default last-wins tie-break.
pub fn pareto_frontier(points: &[Point]) -> Vec<FrontierPoint> {
    pareto_frontier_with(points, TieBreak::default())
}

/// Pareto frontier of `points`: strictly increasing x, non-decreasing y.
/// Empty input gives an empty frontier.
pub fn pareto_frontier_with(points: &[Point], tie_break: TieBreak) -> Vec<FrontierPoint> {
    let candidates = best_per_x(points, tie_break);
    log::debug!(
        "{} points reduced to {} distinct-x candidates",
        points.len(),
        candidates.len()
    );

    let mut frontier = Vec::new();
    let mut max_y = f64::NEG_INFINITY;
    for candidate in candidates {
        if candidate.y >= max_y {
            max_y = candidate.y;
            frontier.push(FrontierPoint::new(candidate));
        }
    }
    frontier
}

/// Whether `point` is strictly dominated by any member of `others`.
pub fn is_dominated(point: &Point, others: &[Point]) -> bool {
    others.iter().any(|other| other.dominates(point))
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

/// Filter the table's records into points and extract their frontier.
///
/// Returns [`ParetoError::NoValidData`] without running the extractor when no
/// record has a finite x and y.
pub fn analyze(
    table: &Table,
    columns: &ColumnSelection,
    tie_break: TieBreak,
) -> Result<Analysis, ParetoError> {
    for column in [&columns.x, &columns.y] {
        if !table.has_column(column) {
            log::warn!("column '{column}' not found in input; available: {:?}", table.columns);
        }
    }

    let points = extract_points(&table.records, columns)?;
    let frontier = pareto_frontier_with(&points, tie_break);
    log::info!(
        "{} valid points, {} on the frontier",
        points.len(),
        frontier.len()
    );
    Ok(Analysis { points, frontier })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, label: &str) -> Point {
        Point::new(x, y, label)
    }

    fn labels(frontier: &[FrontierPoint]) -> Vec<&str> {
        frontier.iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn dominated_point_is_dropped() {
        let points = vec![p(1.0, 0.5, "a"), p(2.0, 0.7, "b"), p(3.0, 0.6, "c")];
        let frontier = pareto_frontier(&points);
        assert_eq!(labels(&frontier), vec!["a", "b"]);
        assert_eq!(frontier[1].point(), &p(2.0, 0.7, "b"));
    }

    #[test]
    fn equal_point_tie_keeps_last_by_default() {
        let points = vec![p(1.0, 0.5, "a"), p(1.0, 0.5, "b")];
        assert_eq!(labels(&pareto_frontier(&points)), vec!["b"]);
    }

    #[test]
    fn equal_point_tie_can_keep_first() {
        let points = vec![p(1.0, 0.5, "a"), p(1.0, 0.5, "b")];
        let frontier = pareto_frontier_with(&points, TieBreak::First);
        assert_eq!(labels(&frontier), vec!["a"]);
    }

    #[test]
    fn flat_y_extends_frontier() {
        let points = vec![p(1.0, 0.8, "a"), p(2.0, 0.8, "b")];
        assert_eq!(labels(&pareto_frontier(&points)), vec!["a", "b"]);
    }

    #[test]
    fn best_y_wins_within_same_x() {
        let points = vec![p(2.0, 0.3, "low"), p(2.0, 0.9, "high"), p(2.0, 0.1, "lower")];
        assert_eq!(best_per_x(&points, TieBreak::Last), vec![p(2.0, 0.9, "high")]);
        assert_eq!(best_per_x(&points, TieBreak::First), vec![p(2.0, 0.9, "high")]);
    }

    #[test]
    fn signed_zero_is_one_x() {
        let points = vec![p(-0.0, 0.2, "neg"), p(0.0, 0.4, "pos")];
        let reduced = best_per_x(&points, TieBreak::Last);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].label, "pos");
        assert_eq!(reduced[0].y, 0.4);
        // The group reports the x it was first seen with.
        assert!(reduced[0].x.is_sign_negative());

        let flipped = vec![p(0.0, 0.4, "pos"), p(-0.0, 0.4, "neg")];
        let reduced = best_per_x(&flipped, TieBreak::First);
        assert_eq!(reduced[0].label, "pos");
        assert!(reduced[0].x.is_sign_positive());
    }

    #[test]
    fn candidates_are_sorted_by_x() {
        let points = vec![p(5.0, 1.0, "e"), p(-1.0, 0.0, "n"), p(2.5, 0.5, "m")];
        let xs: Vec<f64> = best_per_x(&points, TieBreak::Last).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.0, 2.5, 5.0]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(pareto_frontier(&[]).is_empty());
        let single = pareto_frontier(&[p(4.0, -2.0, "only")]);
        assert_eq!(labels(&single), vec!["only"]);
    }

    #[test]
    fn domination_check() {
        let others = vec![p(1.0, 0.9, "best")];
        assert!(is_dominated(&p(2.0, 0.5, "worse"), &others));
        assert!(!is_dominated(&p(0.5, 0.1, "cheaper"), &others));
        assert!(!is_dominated(&p(1.0, 0.9, "same"), &others));
    }

    #[test]
    fn tie_break_parses() {
        assert_eq!("first".parse::<TieBreak>(), Ok(TieBreak::First));
        assert_eq!("LAST".parse::<TieBreak>(), Ok(TieBreak::Last));
        assert!("middle".parse::<TieBreak>().is_err());
        assert_eq!(TieBreak::First.to_string(), "first");
    }

    #[test]
    fn analyze_skips_invalid_rows() {
        use crate::data::model::Record;

        let table = Table::new(
            vec!["x".into(), "y".into(), "tag".into()],
            vec![
                Record::from_pairs([("x", "1"), ("y", "0.5"), ("tag", "a")]),
                Record::from_pairs([("x", "0.5"), ("y", "N/A"), ("tag", "d")]),
                Record::from_pairs([("x", "2"), ("y", "0.7"), ("tag", "b")]),
            ],
        );
        let columns = ColumnSelection::new("x", "y", "tag");
        let analysis = analyze(&table, &columns, TieBreak::Last).unwrap();
        assert_eq!(analysis.points.len(), 2);
        assert!(analysis.points.iter().all(|p| p.label != "d"));
        assert_eq!(labels(&analysis.frontier), vec!["a", "b"]);
    }

    #[test]
    fn analyze_reports_empty_input() {
        let table = Table::new(vec!["x".into()], Vec::new());
        let err = analyze(&table, &ColumnSelection::new("x", "y", "l"), TieBreak::Last).unwrap_err();
        assert!(err.is_no_valid_data());
    }
}

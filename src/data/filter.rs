use super::model::{Point, Record};
use crate::config::ColumnSelection;
use crate::error::ParetoError;

// ---------------------------------------------------------------------------
// Record → Point filtering
// ---------------------------------------------------------------------------

/// Parse a raw cell as a finite real number.
///
/// Surrounding whitespace is ignored.  Absent cells, text that is not a
/// number, NaN and ±infinity all yield `None`.
pub fn parse_finite(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Turn one record into a point, or `None` when x or y is unusable.
///
/// The label never causes rejection; a missing label is the empty string.
pub fn point_from_record(record: &Record, columns: &ColumnSelection) -> Option<Point> {
    let x = parse_finite(record.get(&columns.x))?;
    let y = parse_finite(record.get(&columns.y))?;
    let label = record.get(&columns.label).unwrap_or_default();
    Some(Point::new(x, y, label))
}

/// Return the points of all records that have a finite x and y, in input
/// order.
///
/// Rejected records are dropped silently.  When nothing survives the result
/// is [`ParetoError::NoValidData`], which callers treat as "nothing to plot"
/// rather than a failure.
pub fn extract_points(
    records: &[Record],
    columns: &ColumnSelection,
) -> Result<Vec<Point>, ParetoError> {
    let points: Vec<Point> = records
        .iter()
        .filter_map(|rec| point_from_record(rec, columns))
        .collect();

    let skipped = records.len() - points.len();
    if skipped > 0 {
        log::debug!(
            "skipped {skipped} of {} records without numeric '{}' and '{}'",
            records.len(),
            columns.x,
            columns.y
        );
    }

    if points.is_empty() {
        return Err(ParetoError::NoValidData {
            x_column: columns.x.clone(),
            y_column: columns.y.clone(),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnSelection {
        ColumnSelection::new("x", "y", "tag")
    }

    #[test]
    fn parse_finite_rejects_non_numbers() {
        assert_eq!(parse_finite(Some("1.25")), Some(1.25));
        assert_eq!(parse_finite(Some("  -3e2 ")), Some(-300.0));
        assert_eq!(parse_finite(Some("N/A")), None);
        assert_eq!(parse_finite(Some("NaN")), None);
        assert_eq!(parse_finite(Some("inf")), None);
        assert_eq!(parse_finite(Some("-infinity")), None);
        assert_eq!(parse_finite(Some("")), None);
        assert_eq!(parse_finite(None), None);
    }

    #[test]
    fn missing_label_defaults_to_empty() {
        let rec = Record::from_pairs([("x", "1"), ("y", "2")]);
        let point = point_from_record(&rec, &columns()).unwrap();
        assert_eq!(point, Point::new(1.0, 2.0, ""));
    }

    #[test]
    fn invalid_rows_are_skipped_and_order_kept() {
        let records = vec![
            Record::from_pairs([("x", "3"), ("y", "0.6"), ("tag", "c")]),
            Record::from_pairs([("x", "1"), ("y", "N/A"), ("tag", "bad")]),
            Record::from_pairs([("y", "0.9"), ("tag", "no-x")]),
            Record::from_pairs([("x", "1"), ("y", "0.5"), ("tag", "a")]),
        ];
        let points = extract_points(&records, &columns()).unwrap();
        assert_eq!(
            points,
            vec![Point::new(3.0, 0.6, "c"), Point::new(1.0, 0.5, "a")]
        );
    }

    #[test]
    fn nothing_valid_is_reported() {
        let records = vec![Record::from_pairs([("x", "oops"), ("y", "1")])];
        let err = extract_points(&records, &columns()).unwrap_err();
        assert!(err.is_no_valid_data());

        let err = extract_points(&[], &columns()).unwrap_err();
        assert!(err.is_no_valid_data());
    }
}

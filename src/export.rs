use std::io::Write;
use std::path::Path;

use crate::config::ColumnSelection;
use crate::data::model::FrontierPoint;
use crate::error::ParetoError;
use crate::render::create_parent_dirs;

/// Write the frontier as CSV, one row per point in frontier order.  The
/// header repeats the selected column names so the file reads like a slice
/// of the input table.
pub fn write_frontier_csv(
    path: &Path,
    columns: &ColumnSelection,
    frontier: &[FrontierPoint],
) -> Result<(), ParetoError> {
    create_parent_dirs(path)?;
    let file = std::fs::File::create(path).map_err(|source| ParetoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_frontier(file, columns, frontier).map_err(|source| ParetoError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} frontier rows to {}", frontier.len(), path.display());
    Ok(())
}

/// Serialise the frontier to any writer.
pub fn write_frontier<W: Write>(
    out: W,
    columns: &ColumnSelection,
    frontier: &[FrontierPoint],
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record([&columns.x, &columns.y, &columns.label])?;
    for point in frontier {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;
    use crate::pareto::pareto_frontier;

    #[test]
    fn frontier_rows_use_selected_headers() {
        let frontier = pareto_frontier(&[
            Point::new(1.0, 0.5, "a"),
            Point::new(2.0, 0.7, "b, quoted"),
            Point::new(3.0, 0.6, "c"),
        ]);
        let mut out = Vec::new();
        write_frontier(&mut out, &ColumnSelection::new("energy", "score", "tag"), &frontier).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "energy,score,tag\n1.0,0.5,a\n2.0,0.7,\"b, quoted\"\n");
    }
}

use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::{ChartOptions, ColumnSelection};
use crate::data::loader::load_file;
use crate::data::model::{Analysis, Table};
use crate::pareto::{analyze, TieBreak};
use crate::render::render_png;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a file is opened).
    pub table: Option<Table>,

    /// Where the table came from.
    pub source: Option<PathBuf>,

    /// Columns feeding x, y and the labels.
    pub columns: ColumnSelection,

    pub tie_break: TieBreak,

    /// Title, size and label toggle; shared with PNG export.
    pub chart: ChartOptions,

    /// Result for the current table and selection (None when nothing valid).
    pub analysis: Option<Analysis>,

    /// Label → colour for the current analysis.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(columns: ColumnSelection, tie_break: TieBreak, chart: ChartOptions) -> Self {
        Self {
            columns,
            tie_break,
            chart,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded table and recompute the frontier.
    pub fn set_table(&mut self, table: Table, source: Option<PathBuf>) {
        self.table = Some(table);
        self.source = source;
        self.reanalyze();
    }

    /// Load a table from disk, keeping the previous one on failure.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute the analysis after a table, column or tie-break change.
    pub fn reanalyze(&mut self) {
        let Some(table) = &self.table else {
            self.analysis = None;
            return;
        };

        match analyze(table, &self.columns, self.tie_break) {
            Ok(analysis) => {
                self.color_map = ColorMap::new(analysis.points.iter().map(|p| p.label.as_str()));
                self.analysis = Some(analysis);
                self.status_message = None;
            }
            Err(e) => {
                if e.is_no_valid_data() {
                    log::warn!("{e}");
                } else {
                    log::error!("{e}");
                }
                self.analysis = None;
                self.color_map = ColorMap::default();
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn set_x_column(&mut self, column: String) {
        self.columns.x = column;
        self.reanalyze();
    }

    pub fn set_y_column(&mut self, column: String) {
        self.columns.y = column;
        self.reanalyze();
    }

    pub fn set_label_column(&mut self, column: String) {
        self.columns.label = column;
        self.reanalyze();
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
        self.reanalyze();
    }

    /// Write the current analysis as a PNG.  Reports through the status line.
    pub fn export_png(&mut self, path: &Path) {
        let Some(analysis) = &self.analysis else {
            self.status_message = Some("Nothing to export".to_string());
            return;
        };
        match render_png(path, analysis, &self.columns, &self.chart) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Column names of the loaded table (empty without one).
    pub fn column_names(&self) -> &[String] {
        self.table.as_ref().map(|t| t.columns.as_slice()).unwrap_or(&[])
    }
}

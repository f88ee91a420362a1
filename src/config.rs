use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_INPUT: &str = "results/trials.csv";
pub const DEFAULT_OUTPUT: &str = "results/pareto.png";
pub const DEFAULT_X_COLUMN: &str = "metric_energy_total_J";
pub const DEFAULT_Y_COLUMN: &str = "metric_rougeL";
pub const DEFAULT_LABEL_COLUMN: &str = "cfg_brevity";
pub const DEFAULT_TITLE: &str = "Accuracy vs Energy (Pareto)";
/// 10 x 7 inches at 180 dpi.
pub const DEFAULT_WIDTH: u32 = 1800;
pub const DEFAULT_HEIGHT: u32 = 1260;

// ---------------------------------------------------------------------------
// Column selection – the only configuration the core consumes
// ---------------------------------------------------------------------------

/// Which columns feed the two axes and the point labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    /// Minimised axis.
    pub x: String,
    /// Maximised axis.
    pub y: String,
    pub label: String,
}

impl ColumnSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnSelection {
            x: x.into(),
            y: y.into(),
            label: label.into(),
        }
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        ColumnSelection::new(DEFAULT_X_COLUMN, DEFAULT_Y_COLUMN, DEFAULT_LABEL_COLUMN)
    }
}

// ---------------------------------------------------------------------------
// Chart options – presentation only
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Annotate every point with its label.
    pub show_labels: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_labels: true,
        }
    }
}

/// Human-readable axis name for a column: drops the `metric_` / `cfg_`
/// prefixes, turns underscores into spaces and title-cases each word.
///
/// `metric_energy_total_J` → `Energy Total J`
pub fn prettify_column(name: &str) -> String {
    let stripped = name.replace("metric_", "").replace("cfg_", "").replace('_', " ");

    let mut out = String::with_capacity(stripped.len());
    let mut at_word_start = true;
    for ch in stripped.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

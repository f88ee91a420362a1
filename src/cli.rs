use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use crate::config::{
    ChartOptions, ColumnSelection, DEFAULT_HEIGHT, DEFAULT_INPUT, DEFAULT_LABEL_COLUMN,
    DEFAULT_OUTPUT, DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_X_COLUMN, DEFAULT_Y_COLUMN,
};
use crate::data::loader::load_file;
use crate::export::write_frontier_csv;
use crate::pareto::{analyze, TieBreak};
use crate::render::render_png;
use crate::state::AppState;

/// Scatter + Pareto frontier plot for any two metrics
#[derive(Debug, Parser)]
#[command(name = "pareto-plot", version)]
#[command(about = "Scatter + Pareto frontier plot for any two metrics")]
pub struct Cli {
    /// Table with trial metrics (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub csv: PathBuf,

    /// Output image file
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Column name for X axis (to minimize)
    #[arg(long, default_value = DEFAULT_X_COLUMN)]
    pub x: String,

    /// Column name for Y axis (to maximize)
    #[arg(long, default_value = DEFAULT_Y_COLUMN)]
    pub y: String,

    /// Column to use for point labels
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    pub label: String,

    /// Plot title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Which of several equal-x, equal-y trials to keep (first or last)
    #[arg(long, default_value_t = TieBreak::Last)]
    pub tie_break: TieBreak,

    /// Also write the frontier rows to this CSV file
    #[arg(long)]
    pub frontier_csv: Option<PathBuf>,

    /// Do not annotate points with their labels
    #[arg(long)]
    pub no_labels: bool,

    /// Open the interactive viewer instead of writing the image
    #[arg(long)]
    pub view: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How a batch run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Chart written to this absolute path.
    Saved(PathBuf),
    /// No record had a numeric x and y; nothing was rendered.
    NoValidData,
    /// The viewer was opened and closed.
    Viewed,
}

impl Cli {
    pub fn columns(&self) -> ColumnSelection {
        ColumnSelection::new(&self.x, &self.y, &self.label)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            show_labels: !self.no_labels,
        }
    }

    /// Default `env_logger` filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Load → filter → extract → render, or hand the table to the viewer.
pub fn run(cli: &Cli) -> Result<Outcome> {
    if cli.view {
        crate::app::run(viewer_state(cli)?)?;
        return Ok(Outcome::Viewed);
    }

    let table = load_file(&cli.csv)?;
    let columns = cli.columns();
    let analysis = match analyze(&table, &columns, cli.tie_break) {
        Ok(analysis) => analysis,
        Err(e) if e.is_no_valid_data() => {
            log::warn!("{e}");
            return Ok(Outcome::NoValidData);
        }
        Err(e) => return Err(e.into()),
    };

    render_png(&cli.out, &analysis, &columns, &cli.chart_options())?;

    if let Some(path) = &cli.frontier_csv {
        write_frontier_csv(path, &columns, &analysis.frontier)?;
    }

    Ok(Outcome::Saved(absolute(&cli.out)?))
}

/// Initial viewer state.  A `--csv` path that does not exist leaves the viewer
/// empty so a table can be picked with File → Open.
fn viewer_state(cli: &Cli) -> Result<AppState> {
    let mut state = AppState::new(cli.columns(), cli.tie_break, cli.chart_options());
    if cli.csv.exists() {
        state.set_table(load_file(&cli.csv)?, Some(cli.csv.clone()));
    } else {
        log::info!("{} not found; starting the viewer empty", cli.csv.display());
    }
    Ok(state)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).with_context(|| format!("resolving {}", path.display()))
}

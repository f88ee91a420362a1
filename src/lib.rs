//! Pareto frontier extraction and plotting for experiment trial tables.
//!
//! The core is [`data`] (table → valid points) and [`pareto`] (points →
//! frontier).  [`render`], [`export`] and the viewer ([`app`], [`state`],
//! [`ui`]) only consume an [`Analysis`].

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod pareto;
pub mod render;
pub mod state;
pub mod ui;

pub use config::{ChartOptions, ColumnSelection};
pub use data::model::{Analysis, FrontierPoint, Point, Record, Table};
pub use error::ParetoError;
pub use pareto::{analyze, best_per_x, pareto_frontier, pareto_frontier_with, TieBreak};

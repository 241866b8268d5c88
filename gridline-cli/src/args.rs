//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gridline_lib::engine::Direction;

/// Render a JSON dataset as a sorted, filtered, paginated table.
#[derive(Debug, Parser)]
#[command(name = "gridline", version)]
pub struct Cli {
    /// JSON file holding an array of row objects.
    #[arg(long, short = 'd')]
    pub data: PathBuf,

    /// View file describing key field, columns and initial table state.
    /// Defaults to view.json in the config directory, if present.
    #[arg(long)]
    pub view: Option<PathBuf>,

    /// Sort by a column, as KEY, KEY:asc or KEY:desc.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortArg>,

    /// Keep rows whose searchable columns contain this text.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to show (1-based). Out-of-range pages are clamped.
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Rows per page.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Select the row with this key. May be repeated.
    #[arg(long = "select", value_name = "KEY")]
    pub select: Vec<String>,

    /// Select every row on the shown page.
    #[arg(long, default_value_t = false)]
    pub select_page: bool,

    /// Print the view as JSON instead of a text table.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// A `--sort` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub key: String,
    pub direction: Direction,
}

impl SortArg {
    /// Header clicks needed to reach this sort from an unsorted table.
    pub fn clicks(&self) -> usize {
        match self.direction {
            Direction::Asc => 1,
            Direction::Desc => 2,
        }
    }
}

fn parse_sort(s: &str) -> Result<SortArg, String> {
    let (key, direction) = match s.rsplit_once(':') {
        Some((key, "asc")) => (key, Direction::Asc),
        Some((key, "desc")) => (key, Direction::Desc),
        Some((_, other)) => {
            return Err(format!("unknown sort direction '{}', expected asc or desc", other));
        }
        None => (s, Direction::Asc),
    };
    if key.is_empty() {
        return Err("sort key is empty".to_string());
    }
    Ok(SortArg {
        key: key.to_string(),
        direction,
    })
}

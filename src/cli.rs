//! Command line arguments.

use crate::charts::SortMode;
use crate::logging::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "disaster-bars",
    version,
    about = "Animated bar chart of disaster occurrences per type and year"
)]
pub struct Cli {
    /// CSV file with `Disaster.Type` and `Start.Year` columns.
    #[arg(value_name = "CSV", default_value = "./df_subset.csv")]
    pub csv: PathBuf,

    /// Year selected when the chart opens (default: earliest year in the data).
    #[arg(long)]
    pub year: Option<i32>,

    /// Initial sort order of the bars.
    #[arg(long, value_enum, default_value = "none")]
    pub sort: SortArg,

    /// JSON file overriding chart geometry, timing and column names.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[value(name = "none")]
    None,
    #[value(name = "cntAsce")]
    Ascending,
    #[value(name = "cntDesc")]
    Descending,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => SortMode::None,
            SortArg::Ascending => SortMode::Ascending,
            SortArg::Descending => SortMode::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

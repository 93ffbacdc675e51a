//! CLI argument definitions for the listing dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "eatout",
    version,
    about = "Eat Out dashboard - restaurant listing rankings in the terminal",
    long_about = "Normalize, clean and enrich a restaurant listing export, convert\n\
                  prices with an exchange-rate snapshot, and print the dashboard views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file with pipeline options and directory overrides.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Fail on unknown currencies and countries instead of falling back.
    #[arg(long = "strict-lookups", global = true)]
    pub strict_lookups: bool,

    /// Converted prices above this value are treated as missing.
    #[arg(long = "max-price-brl", value_name = "AMOUNT", global = true)]
    pub max_price_brl: Option<f64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Headline metrics and per-country rankings.
    Overview(ViewArgs),

    /// City rankings by cuisine variety, rating band and price.
    Cities(ViewArgs),

    /// Restaurant highlights and cuisine rankings.
    Cuisines(ViewArgs),

    /// Overview, cities and cuisines from a single load.
    Report(ViewArgs),

    /// Map marker projection.
    Markers(MarkerArgs),

    /// List the country directory.
    Countries,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Listing CSV export.
    #[arg(value_name = "LISTINGS")]
    pub listings: PathBuf,

    /// Exchange-rate JSON snapshot.
    #[arg(value_name = "RATES")]
    pub rates: PathBuf,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Keep only these countries (repeatable).
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    #[arg(long = "min-rating", value_name = "RATING")]
    pub min_rating: Option<f64>,

    #[arg(long = "max-rating", value_name = "RATING")]
    pub max_rating: Option<f64>,

    /// Lower bound on the converted price for two.
    #[arg(long = "min-price", value_name = "AMOUNT")]
    pub min_price: Option<f64>,

    /// Upper bound on the converted price for two.
    #[arg(long = "max-price", value_name = "AMOUNT")]
    pub max_price: Option<f64>,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Rows per ranking.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,
}

#[derive(Args)]
pub struct MarkerArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print JSON instead of a table.
    #[arg(long = "json", conflicts_with = "csv")]
    pub json: bool,

    /// Write markers to a CSV file.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI argument definitions for the order line normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use orderline_normalization::NonFiniteTaxPolicy;

#[derive(Parser)]
#[command(
    name = "orderline",
    version,
    about = "Derive gift certificate product lines from exported order documents",
    long_about = "Normalize exported order documents and derive product lines.\n\n\
                  Single-or-array groups are coerced to arrays, one product line is\n\
                  appended to newProductLines per gift certificate line item, and\n\
                  gift-certificate-funded payments are detected."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow raw field values (prices, amounts) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a batch of order documents and derive product lines.
    Normalize(NormalizeArgs),

    /// Show the effective catalog configuration.
    Catalog(CatalogArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// JSON file holding an array of order documents or a single document ("-" for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the processed batch here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// TOML file with [catalog] and [policy] tables.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append an offsetting line for each gift-certificate-funded payment.
    ///
    /// Off by default: gift certificate payments are only detected and counted.
    #[arg(long = "emit-gift-offsets")]
    pub emit_gift_offsets: bool,

    /// How a non-numeric or missing tax maps to a tax code.
    #[arg(long = "non-finite-tax", value_enum)]
    pub non_finite_tax: Option<NonFiniteTaxArg>,

    /// Process documents on all available cores.
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Skip the summary table.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// TOML file with a [catalog] table.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI choices for the non-finite tax policy.
#[derive(Clone, Copy, ValueEnum)]
pub enum NonFiniteTaxArg {
    NoOverride,
    NonTaxable,
    Reject,
}

impl From<NonFiniteTaxArg> for NonFiniteTaxPolicy {
    fn from(arg: NonFiniteTaxArg) -> Self {
        match arg {
            NonFiniteTaxArg::NoOverride => Self::NoOverride,
            NonFiniteTaxArg::NonTaxable => Self::NonTaxable,
            NonFiniteTaxArg::Reject => Self::Reject,
        }
    }
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

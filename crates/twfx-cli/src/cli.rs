//! CLI argument definitions for twfx.
//!
//! # Examples
//!
//! ```bash
//! # Live USD rates
//! twfx --type current --currency USD
//!
//! # Last six months of EUR as CSV
//! twfx --type historical --currency EUR --period l6m --output csv
//!
//! # One month of JPY
//! twfx --type historical --currency JPY --period month --date 2025-01
//!
//! # Cash quotes for a single day, as JSON
//! twfx --type historical --period day --date 2025-01-24 --rate-type cash --output json
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use twfx_core::{QueryMode, RateType};

/// Bank of Taiwan exchange rates from the command line
#[derive(Debug, Parser)]
#[command(
    name = "twfx",
    author,
    version,
    about = "Query Bank of Taiwan foreign-exchange rates"
)]
pub struct Cli {
    /// Query type: live board or history.
    #[arg(long = "type", value_enum, default_value_t = QueryType::Current)]
    pub query_type: QueryType,

    /// Currency code (USD, EUR, JPY, ...).
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// History period: ltm (3 months), l6m (6 months), month, day.
    #[arg(long, value_enum, default_value_t = Period::L6m)]
    pub period: Period,

    /// Date for month (YYYY-MM) and day (YYYY-MM-DD) queries.
    #[arg(long)]
    pub date: Option<String>,

    /// Rate type for day queries.
    #[arg(long, value_enum, default_value_t = RateTypeArg::Spot)]
    pub rate_type: RateTypeArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Show at most this many history rows (0 shows all).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryType {
    Current,
    Historical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    #[value(alias = "recent_3m")]
    Ltm,
    #[value(alias = "recent_6m")]
    L6m,
    Month,
    Day,
}

impl From<Period> for QueryMode {
    fn from(period: Period) -> Self {
        match period {
            Period::Ltm => QueryMode::Recent3Months,
            Period::L6m => QueryMode::Recent6Months,
            Period::Month => QueryMode::Month,
            Period::Day => QueryMode::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RateTypeArg {
    Spot,
    Cash,
}

impl From<RateTypeArg> for RateType {
    fn from(arg: RateTypeArg) -> Self {
        match arg {
            RateTypeArg::Spot => RateType::Spot,
            RateTypeArg::Cash => RateType::Cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
}

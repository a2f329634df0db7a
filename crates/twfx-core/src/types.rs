//! Data types for the Bank of Taiwan FX client
//!
//! All records keep rates as the strings the bank renders. The site shows "-"
//! for rates it does not quote, so nothing here is coerced to a number.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One row of a historical rate table in the fixed five-column schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    /// Listing date as shown by the bank (e.g. "2025/01/24")
    pub date: String,
    /// Bank buys banknotes
    pub cash_buy: String,
    /// Bank sells banknotes
    pub cash_sell: String,
    /// Bank buys wire/spot currency
    pub spot_buy: String,
    /// Bank sells wire/spot currency
    pub spot_sell: String,
}

impl CanonicalRow {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 5] = ["date", "cash_buy", "cash_sell", "spot_buy", "spot_sell"];

    /// Field values in the same order as [`CanonicalRow::COLUMNS`]
    pub fn values(&self) -> [&str; 5] {
        [
            &self.date,
            &self.cash_buy,
            &self.cash_sell,
            &self.spot_buy,
            &self.spot_sell,
        ]
    }
}

/// One row of a single-day quote table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRate {
    /// Rate-kind label exactly as the bank prints it
    #[serde(rename = "type")]
    pub kind: String,
    /// Quoted amount
    pub rate: String,
}

impl DayRate {
    pub const COLUMNS: [&'static str; 2] = ["type", "rate"];

    pub fn values(&self) -> [&str; 2] {
        [&self.kind, &self.rate]
    }
}

/// Live rate for a single currency, taken from the current-rate board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentRateSnapshot {
    /// ISO code, uppercase (e.g. "USD")
    pub currency_code: String,
    /// Display label of the matched row (e.g. "美金 (USD)")
    pub currency_name: String,
    pub cash_buy: String,
    pub cash_sell: String,
    pub spot_buy: String,
    pub spot_sell: String,
    /// Local time the page was read
    pub observed_at: DateTime<Local>,
}

/// Result of a historical query
///
/// Serializes as a plain JSON array of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HistoricalRates {
    /// Daily series (recent 3/6 months or a single month)
    Series(Vec<CanonicalRow>),
    /// Quotes for a single day
    Day(Vec<DayRate>),
}

impl HistoricalRates {
    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Self::Series(rows) => rows.len(),
            Self::Day(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep at most `limit` records from the top of the table
    pub fn truncate(&mut self, limit: usize) {
        match self {
            Self::Series(rows) => rows.truncate(limit),
            Self::Day(rows) => rows.truncate(limit),
        }
    }

    /// Column names for tabular output
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Series(_) => &CanonicalRow::COLUMNS,
            Self::Day(_) => &DayRate::COLUMNS,
        }
    }

    /// Records as rows of cell strings, in [`HistoricalRates::columns`] order
    pub fn records(&self) -> Vec<Vec<&str>> {
        match self {
            Self::Series(rows) => rows.iter().map(|r| r.values().to_vec()).collect(),
            Self::Day(rows) => rows.iter().map(|r| r.values().to_vec()).collect(),
        }
    }
}

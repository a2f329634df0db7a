//! Bank of Taiwan FX Core Library
//!
//! This crate reads foreign-exchange rates published by the Bank of Taiwan
//! on rate.bot.com.tw.
//!
//! # Features
//! - Live cash and spot buy/sell rates for a currency
//! - Historical rates for the last 3 or 6 months, a month, or a single day
//! - Normalization of the site's merged-header tables into fixed columns
//! - TWD conversion helpers on top of a live snapshot

pub mod client;
pub mod convert;
pub mod currency;
pub mod error;
pub mod parser;
pub mod query;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, FxClient};
pub use error::{ErrorKind, FxError, Result};
pub use query::{HistoryQuery, QueryMode, RateType};
pub use crate::scraper::TwBankScraper;
pub use types::{CanonicalRow, CurrentRateSnapshot, DayRate, HistoricalRates};

//! Main Bank of Taiwan FX API
//!
//! This module provides the high-level API. It combines the HTTP client
//! with the parsers to answer two questions: what is the rate right now,
//! and what has it been.

use chrono::Local;
use tracing::{debug, info};

use crate::client::FxClient;
use crate::currency::normalize_code;
use crate::error::Result;
use crate::parser::{extract_current_rate, normalize_day, normalize_history, read_first_table};
use crate::query::{HistoryQuery, QueryMode};
use crate::types::{CurrentRateSnapshot, HistoricalRates};

/// Path of the live rate board
const CURRENT_RATE_PATH: &str = "/xrt?Lang=zh-TW";

/// Main API for Bank of Taiwan exchange rates
///
/// Each call issues one request and either returns a complete result or
/// fails; nothing is retried or cached.
///
/// # Example
/// ```no_run
/// use twfx_core::TwBankScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = TwBankScraper::new()?;
///
///     let usd = scraper.current_rate("USD").await?;
///     println!("USD spot sell: {}", usd.spot_sell);
///
///     Ok(())
/// }
/// ```
pub struct TwBankScraper {
    client: FxClient,
}

impl TwBankScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Example
    /// ```
    /// use twfx_core::TwBankScraper;
    ///
    /// let scraper = TwBankScraper::new().expect("Failed to create scraper");
    /// ```
    pub fn new() -> Result<Self> {
        let client = FxClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with a custom client.
    ///
    /// This is useful for testing or when you need a different timeout.
    pub fn with_client(client: FxClient) -> Self {
        Self { client }
    }

    /// Get the live rate for one currency.
    ///
    /// # Arguments
    /// * `currency` - Currency code, case-insensitive (e.g. "usd")
    ///
    /// # Returns
    /// * `Ok(CurrentRateSnapshot)` with the board's cash and spot rates
    /// * `Err(FxError::InvalidParameter)` if the code is empty or malformed
    /// * `Err(FxError::CurrencyNotFound)` if the board has no such row
    ///
    /// # Example
    /// ```no_run
    /// use twfx_core::TwBankScraper;
    ///
    /// # async fn example() -> Result<(), twfx_core::FxError> {
    /// let scraper = TwBankScraper::new()?;
    /// let jpy = scraper.current_rate("JPY").await?;
    /// println!("{} cash sell {}", jpy.currency_name, jpy.cash_sell);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn current_rate(&self, currency: &str) -> Result<CurrentRateSnapshot> {
        let code = normalize_code(currency)?;

        let html = self.client.fetch(CURRENT_RATE_PATH).await?;
        let snapshot = extract_current_rate(&html, &code, Local::now())?;

        info!(currency = %code, spot_sell = %snapshot.spot_sell, "current rate");
        Ok(snapshot)
    }

    /// Get historical rates.
    ///
    /// # Arguments
    /// * `query` - Currency, period and, for month/day queries, the date
    ///
    /// # Returns
    /// * `Ok(HistoricalRates::Series)` for 3-month, 6-month and month queries
    /// * `Ok(HistoricalRates::Day)` for single-day queries
    /// * `Err(FxError::InvalidParameter)` if the query fails validation
    /// * `Err(FxError::ParseError)` if the page has no usable table
    ///
    /// # Example
    /// ```no_run
    /// use twfx_core::{HistoryQuery, TwBankScraper};
    ///
    /// # async fn example() -> Result<(), twfx_core::FxError> {
    /// let scraper = TwBankScraper::new()?;
    /// let query = HistoryQuery::month("EUR", "2025-01")?;
    /// let history = scraper.historical_rates(&query).await?;
    /// println!("{} rows", history.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn historical_rates(&self, query: &HistoryQuery) -> Result<HistoricalRates> {
        query.validate()?;

        let path = query.path();
        let html = self.client.fetch(&path).await?;
        let table = read_first_table(&html)?;
        debug!(%path, width = table.width(), rows = table.rows.len(), "read quote table");

        let rates = match query.mode {
            QueryMode::Day => HistoricalRates::Day(normalize_day(&table)?),
            _ => HistoricalRates::Series(normalize_history(&table)?),
        };

        info!(currency = %query.currency, rows = rates.len(), "historical rates");
        Ok(rates)
    }
}

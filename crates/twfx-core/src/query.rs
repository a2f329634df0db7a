//! Historical query parameters
//!
//! A [`HistoryQuery`] describes one request to the bank's quote pages and
//! knows how to turn itself into the URL path for that request.

use std::fmt;
use std::str::FromStr;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::currency::normalize_code;
use crate::error::{FxError, Result};

/// Period covered by a historical query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Last three months, one row per business day
    Recent3Months,
    /// Last six months, one row per business day
    Recent6Months,
    /// One calendar month (date `YYYY-MM`)
    Month,
    /// One day of quotes (date `YYYY-MM-DD`)
    Day,
}

impl QueryMode {
    /// Whether the mode needs a date segment in the URL
    pub fn requires_date(self) -> bool {
        matches!(self, Self::Month | Self::Day)
    }

    /// Path segment used by the bank for the rolling periods
    fn period_segment(self) -> Option<&'static str> {
        match self {
            Self::Recent3Months => Some("ltm"),
            Self::Recent6Months => Some("l6m"),
            Self::Month | Self::Day => None,
        }
    }
}

impl FromStr for QueryMode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltm" | "recent_3m" => Ok(Self::Recent3Months),
            "l6m" | "recent_6m" => Ok(Self::Recent6Months),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            other => Err(FxError::InvalidParameter(format!(
                "unknown period '{other}', expected one of ltm, l6m, month, day"
            ))),
        }
    }
}

/// Rate kind for single-day queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Wire transfer / spot settlement
    Spot,
    /// Banknotes
    Cash,
}

impl RateType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateType {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "cash" => Ok(Self::Cash),
            other => Err(FxError::InvalidParameter(format!(
                "unknown rate type '{other}', expected spot or cash"
            ))),
        }
    }
}

/// Parameters of a historical rate query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Currency code (normalized to uppercase by the constructors)
    pub currency: String,
    pub mode: QueryMode,
    /// `YYYY-MM` for month queries, `YYYY-MM-DD` for day queries
    pub date: Option<String>,
    /// Required for day queries, ignored otherwise
    pub rate_type: Option<RateType>,
}

impl HistoryQuery {
    /// Last three months of daily rates.
    pub fn recent_3m(currency: &str) -> Result<Self> {
        Self::build(currency, QueryMode::Recent3Months, None, None)
    }

    /// Last six months of daily rates.
    pub fn recent_6m(currency: &str) -> Result<Self> {
        Self::build(currency, QueryMode::Recent6Months, None, None)
    }

    /// Daily rates for one month.
    ///
    /// # Example
    /// ```
    /// use twfx_core::HistoryQuery;
    ///
    /// let query = HistoryQuery::month("eur", "2025-01").unwrap();
    /// assert_eq!(query.path(), "/xrt/quote/2025-01/EUR");
    /// ```
    pub fn month(currency: &str, month: &str) -> Result<Self> {
        Self::build(currency, QueryMode::Month, Some(month.to_string()), None)
    }

    /// Quotes for a single day.
    pub fn day(currency: &str, date: &str, rate_type: RateType) -> Result<Self> {
        Self::build(
            currency,
            QueryMode::Day,
            Some(date.to_string()),
            Some(rate_type),
        )
    }

    /// Build and validate a query from loose parts, as a CLI would.
    pub fn build(
        currency: &str,
        mode: QueryMode,
        date: Option<String>,
        rate_type: Option<RateType>,
    ) -> Result<Self> {
        let query = Self {
            currency: normalize_code(currency)?,
            mode,
            date: date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            rate_type,
        };
        query.validate()?;
        Ok(query)
    }

    /// Check the mode/date/rate-type combination.
    ///
    /// # Errors
    /// `FxError::InvalidParameter` when a month or day query has no date,
    /// the date has the wrong shape, or a day query has no rate type.
    pub fn validate(&self) -> Result<()> {
        normalize_code(&self.currency)?;

        if !self.mode.requires_date() {
            return Ok(());
        }

        let date = self.date.as_deref().ok_or_else(|| {
            FxError::InvalidParameter(format!(
                "a date is required for {} queries",
                self.mode_name()
            ))
        })?;

        let (pattern, shape) = match self.mode {
            QueryMode::Month => (r"^\d{4}-(0[1-9]|1[0-2])$", "YYYY-MM"),
            _ => (r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$", "YYYY-MM-DD"),
        };
        let re = Regex::new(pattern)
            .map_err(|e| FxError::InvalidParameter(format!("invalid date pattern: {e}")))?;
        if !re.is_match(date) {
            return Err(FxError::InvalidParameter(format!(
                "date '{date}' must be {shape} for {} queries",
                self.mode_name()
            )));
        }

        if self.mode == QueryMode::Day && self.rate_type.is_none() {
            return Err(FxError::InvalidParameter(
                "a rate type (spot or cash) is required for day queries".to_string(),
            ));
        }

        Ok(())
    }

    /// URL path of the quote page for this query.
    ///
    /// Assumes the query has been validated.
    pub fn path(&self) -> String {
        if let Some(period) = self.mode.period_segment() {
            return format!("/xrt/quote/{}/{}", period, self.currency);
        }

        let date = self.date.as_deref().unwrap_or_default();
        match (self.mode, self.rate_type) {
            (QueryMode::Day, Some(rate_type)) => {
                format!("/xrt/quote/{}/{}/{}", date, self.currency, rate_type)
            }
            _ => format!("/xrt/quote/{}/{}", date, self.currency),
        }
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            QueryMode::Recent3Months => "ltm",
            QueryMode::Recent6Months => "l6m",
            QueryMode::Month => "month",
            QueryMode::Day => "day",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_mode_from_str() {
        assert_eq!("ltm".parse::<QueryMode>().unwrap(), QueryMode::Recent3Months);
        assert_eq!("recent_6m".parse::<QueryMode>().unwrap(), QueryMode::Recent6Months);
        assert_eq!("MONTH".parse::<QueryMode>().unwrap(), QueryMode::Month);
        assert_eq!("day".parse::<QueryMode>().unwrap(), QueryMode::Day);
    }

    #[test]
    fn test_query_mode_unknown() {
        match "week".parse::<QueryMode>() {
            Err(FxError::InvalidParameter(msg)) => assert!(msg.contains("week")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_type_from_str() {
        assert_eq!("spot".parse::<RateType>().unwrap(), RateType::Spot);
        assert_eq!(" Cash ".parse::<RateType>().unwrap(), RateType::Cash);
        assert!("wire".parse::<RateType>().is_err());
    }

    #[test]
    fn test_recent_paths() {
        assert_eq!(
            HistoryQuery::recent_3m("usd").unwrap().path(),
            "/xrt/quote/ltm/USD"
        );
        assert_eq!(
            HistoryQuery::recent_6m("JPY").unwrap().path(),
            "/xrt/quote/l6m/JPY"
        );
    }

    #[test]
    fn test_month_path() {
        let query = HistoryQuery::month("EUR", "2025-01").unwrap();
        assert_eq!(query.path(), "/xrt/quote/2025-01/EUR");
    }

    #[test]
    fn test_day_path() {
        let query = HistoryQuery::day("USD", "2025-01-24", RateType::Cash).unwrap();
        assert_eq!(query.path(), "/xrt/quote/2025-01-24/USD/cash");
    }

    #[test]
    fn test_month_requires_date() {
        let result = HistoryQuery::build("USD", QueryMode::Month, None, None);
        match result {
            Err(FxError::InvalidParameter(msg)) => assert!(msg.contains("date")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_date_counts_as_missing() {
        let result = HistoryQuery::build("USD", QueryMode::Day, Some("  ".to_string()), Some(RateType::Spot));
        assert!(matches!(result, Err(FxError::InvalidParameter(_))));
    }

    #[test]
    fn test_day_requires_rate_type() {
        let result = HistoryQuery::build(
            "USD",
            QueryMode::Day,
            Some("2025-01-24".to_string()),
            None,
        );
        match result {
            Err(FxError::InvalidParameter(msg)) => assert!(msg.contains("rate type")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_date_shape_checked() {
        assert!(HistoryQuery::month("USD", "2025-1").is_err());
        assert!(HistoryQuery::month("USD", "2025-13").is_err());
        assert!(HistoryQuery::month("USD", "2025-01-24").is_err());
        assert!(HistoryQuery::day("USD", "2025-01", RateType::Spot).is_err());
        assert!(HistoryQuery::day("USD", "2025/01/24", RateType::Spot).is_err());
    }

    #[test]
    fn test_rolling_periods_ignore_date() {
        let query = HistoryQuery::build(
            "usd",
            QueryMode::Recent6Months,
            Some("whatever".to_string()),
            Some(RateType::Cash),
        )
        .unwrap();
        assert_eq!(query.path(), "/xrt/quote/l6m/USD");
    }

    #[test]
    fn test_invalid_currency_rejected() {
        assert!(matches!(
            HistoryQuery::recent_6m(""),
            Err(FxError::InvalidParameter(_))
        ));
    }
}

//! Error types for the Bank of Taiwan FX client
//!
//! This module defines all error types used throughout the library.
//! FxError implements Serialize so callers can embed it in JSON output.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for exchange-rate queries
#[derive(Error, Debug)]
pub enum FxError {
    /// A query parameter is missing or malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Page content could not be turned into rate records
    #[error("Failed to parse rate table: {0}")]
    ParseError(String),

    /// The live rate page has no row for the requested currency
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),
}

/// Coarse error category, one per failure class callers usually branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidParameter,
    Request,
    Parse,
}

impl FxError {
    /// Map the error onto its category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::HttpError(_) | Self::Status { .. } => ErrorKind::Request,
            Self::ParseError(_) | Self::CurrencyNotFound(_) => ErrorKind::Parse,
        }
    }
}

/// Serialize FxError as its display string
impl Serialize for FxError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for exchange-rate operations
pub type Result<T> = std::result::Result<T, FxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_error_display_invalid_parameter() {
        let error = FxError::InvalidParameter("date is required for month queries".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid parameter: date is required for month queries"
        );
    }

    #[test]
    fn test_fx_error_display_status() {
        let error = FxError::Status {
            status: 503,
            url: "https://rate.bot.com.tw/xrt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "HTTP status 503 for https://rate.bot.com.tw/xrt"
        );
    }

    #[test]
    fn test_fx_error_display_parse_error() {
        let error = FxError::ParseError("no table".to_string());
        assert_eq!(error.to_string(), "Failed to parse rate table: no table");
    }

    #[test]
    fn test_fx_error_display_currency_not_found() {
        let error = FxError::CurrencyNotFound("XYZ".to_string());
        assert_eq!(error.to_string(), "Currency not found: XYZ");
    }

    #[test]
    fn test_fx_error_kind() {
        assert_eq!(
            FxError::InvalidParameter(String::new()).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            FxError::Status {
                status: 404,
                url: String::new()
            }
            .kind(),
            ErrorKind::Request
        );
        assert_eq!(FxError::ParseError(String::new()).kind(), ErrorKind::Parse);
        assert_eq!(
            FxError::CurrencyNotFound("USD".to_string()).kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_fx_error_serialize() {
        let error = FxError::ParseError("test error".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Failed to parse rate table: test error\"");
    }

    #[test]
    fn test_error_kind_serialize() {
        let json = serde_json::to_string(&ErrorKind::InvalidParameter).unwrap();
        assert_eq!(json, "\"invalid_parameter\"");
    }
}

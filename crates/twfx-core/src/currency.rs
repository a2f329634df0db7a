//! Currency codes known to the Bank of Taiwan rate board

use crate::error::{FxError, Result};

/// Supported currency codes with the display names used on the rate board
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "美金"),
    ("EUR", "歐元"),
    ("JPY", "日圓"),
    ("GBP", "英鎊"),
    ("AUD", "澳幣"),
    ("CAD", "加拿大幣"),
    ("SGD", "新加坡幣"),
    ("CHF", "瑞士法郎"),
    ("HKD", "港幣"),
    ("CNY", "人民幣"),
    ("ZAR", "南非幣"),
    ("SEK", "瑞典幣"),
    ("NZD", "紐西蘭幣"),
    ("THB", "泰幣"),
    ("KRW", "韓元"),
];

/// Look up the Chinese display name for a currency code.
///
/// The lookup is case-insensitive.
///
/// # Examples
/// ```
/// use twfx_core::currency::currency_name;
///
/// assert_eq!(currency_name("usd"), Some("美金"));
/// assert_eq!(currency_name("XYZ"), None);
/// ```
pub fn currency_name(code: &str) -> Option<&'static str> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|(_, name)| *name)
}

/// Trim and uppercase a currency code.
///
/// Codes outside [`SUPPORTED_CURRENCIES`] are accepted as long as they are
/// plain ASCII letters; the bank adds currencies from time to time.
///
/// # Errors
/// `FxError::InvalidParameter` if the code is empty or contains anything
/// other than ASCII letters.
pub fn normalize_code(code: &str) -> Result<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(FxError::InvalidParameter(
            "currency code cannot be empty".to_string(),
        ));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidParameter(format!(
            "invalid currency code: {trimmed}"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

//! Currency conversion against a live snapshot
//!
//! Converting TWD into a foreign currency uses the rate at which the bank
//! buys; converting back uses the rate at which it sells. Rates are parsed
//! from the snapshot strings here, at the edge where numbers are needed.
//! [`check`] compares two snapshots for rate monitoring.

use serde::{Deserialize, Serialize};

use crate::error::{FxError, Result};
use crate::query::RateType;
use crate::types::CurrentRateSnapshot;

/// Outcome of a conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub from_currency: String,
    pub to_currency: String,
    pub from_amount: f64,
    pub to_amount: f64,
    /// Rate applied, TWD per unit of foreign currency
    pub rate: f64,
    pub rate_type: RateType,
}

/// Buy/sell spread of one rate kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub currency: String,
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub spread: f64,
    /// Spread as a percentage of the buy rate
    pub spread_percentage: f64,
    pub rate_type: RateType,
}

/// Convert a TWD amount into the snapshot's currency.
///
/// # Errors
/// - `FxError::InvalidParameter` for a negative or non-finite amount
/// - `FxError::ParseError` if the rate is not quoted ("-") or not positive
pub fn twd_to_foreign(
    snapshot: &CurrentRateSnapshot,
    amount: f64,
    rate_type: RateType,
) -> Result<Conversion> {
    check_amount(amount)?;
    let rate = match rate_type {
        RateType::Cash => parse_rate(&snapshot.cash_buy, "cash_buy")?,
        RateType::Spot => parse_rate(&snapshot.spot_buy, "spot_buy")?,
    };

    Ok(Conversion {
        from_currency: "TWD".to_string(),
        to_currency: snapshot.currency_code.clone(),
        from_amount: amount,
        to_amount: amount / rate,
        rate,
        rate_type,
    })
}

/// Convert an amount of the snapshot's currency into TWD.
///
/// # Errors
/// Same as [`twd_to_foreign`].
pub fn foreign_to_twd(
    snapshot: &CurrentRateSnapshot,
    amount: f64,
    rate_type: RateType,
) -> Result<Conversion> {
    check_amount(amount)?;
    let rate = match rate_type {
        RateType::Cash => parse_rate(&snapshot.cash_sell, "cash_sell")?,
        RateType::Spot => parse_rate(&snapshot.spot_sell, "spot_sell")?,
    };

    Ok(Conversion {
        from_currency: snapshot.currency_code.clone(),
        to_currency: "TWD".to_string(),
        from_amount: amount,
        to_amount: amount * rate,
        rate,
        rate_type,
    })
}

/// Sell minus buy for the chosen rate kind.
pub fn spread(snapshot: &CurrentRateSnapshot, rate_type: RateType) -> Result<Spread> {
    let (buy, sell) = match rate_type {
        RateType::Cash => (
            parse_rate(&snapshot.cash_buy, "cash_buy")?,
            parse_rate(&snapshot.cash_sell, "cash_sell")?,
        ),
        RateType::Spot => (
            parse_rate(&snapshot.spot_buy, "spot_buy")?,
            parse_rate(&snapshot.spot_sell, "spot_sell")?,
        ),
    };
    let spread = sell - buy;

    Ok(Spread {
        currency: snapshot.currency_code.clone(),
        buy_rate: buy,
        sell_rate: sell,
        spread,
        spread_percentage: spread / buy * 100.0,
        rate_type,
    })
}

/// Movement of the spot buying rate between two observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChange {
    pub currency: String,
    /// Current spot_buy
    pub rate: f64,
    /// `None` on the first observation
    pub change: Option<f64>,
    pub change_percentage: Option<f64>,
    /// Set when `|change| >= threshold`
    pub alert: bool,
}

/// Compare `current` against the previous observation of the same currency.
///
/// Tracks spot_buy. Without a previous snapshot there is no change and no
/// alert.
///
/// # Errors
/// - `FxError::InvalidParameter` for a negative or non-finite threshold, or
///   snapshots of different currencies
/// - `FxError::ParseError` if either spot_buy is not quoted ("-")
pub fn check(
    previous: Option<&CurrentRateSnapshot>,
    current: &CurrentRateSnapshot,
    threshold: f64,
) -> Result<RateChange> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(FxError::InvalidParameter(format!(
            "threshold must be a non-negative number, got {threshold}"
        )));
    }
    let rate = parse_rate(&current.spot_buy, "spot_buy")?;

    let Some(previous) = previous else {
        return Ok(RateChange {
            currency: current.currency_code.clone(),
            rate,
            change: None,
            change_percentage: None,
            alert: false,
        });
    };

    if previous.currency_code != current.currency_code {
        return Err(FxError::InvalidParameter(format!(
            "cannot compare {} with {}",
            previous.currency_code, current.currency_code
        )));
    }
    let last = parse_rate(&previous.spot_buy, "previous spot_buy")?;
    let change = rate - last;

    Ok(RateChange {
        currency: current.currency_code.clone(),
        rate,
        change: Some(change),
        change_percentage: Some(change / last * 100.0),
        alert: change.abs() >= threshold,
    })
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FxError::InvalidParameter(format!(
            "amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}

fn parse_rate(value: &str, field: &str) -> Result<f64> {
    let rate: f64 = value
        .trim()
        .parse()
        .map_err(|_| FxError::ParseError(format!("{field} is not quoted: '{value}'")))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(FxError::ParseError(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(rate)
}

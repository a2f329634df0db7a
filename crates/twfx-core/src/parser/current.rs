//! Current-rate board parser
//!
//! Extracts one currency's live rates from the bank's rate board page.

use chrono::{DateTime, Local};
use scraper::{Html, Selector};

use crate::currency::currency_name;
use crate::error::{FxError, Result};
use crate::parser::table::cell_text;
use crate::types::CurrentRateSnapshot;

/// Extract the live rates for `code` from the rate board HTML.
///
/// A row matches only when its text contains both the currency's display
/// name and the parenthesized code, e.g. "美金" and "(USD)". Unknown codes
/// use the code itself as the display name. The first five cells of the
/// matching row are label, cash buy, cash sell, spot buy and spot sell.
///
/// # Arguments
/// * `html` - Raw HTML of the rate board
/// * `code` - Uppercase currency code
/// * `observed_at` - Time stamped onto the snapshot
///
/// # Errors
/// `FxError::CurrencyNotFound` if no row with at least five cells matches.
pub fn extract_current_rate(
    html: &str,
    code: &str,
    observed_at: DateTime<Local>,
) -> Result<CurrentRateSnapshot> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table tbody tr")
        .map_err(|e| FxError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let cell_selector = Selector::parse("td")
        .map_err(|e| FxError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let name = currency_name(code).unwrap_or(code);
    let tagged_code = format!("({code})");

    for row in document.select(&row_selector) {
        let text = row.text().collect::<String>();
        if !text.contains(name) || !text.contains(&tagged_code) {
            continue;
        }

        let cells: Vec<String> = row.select(&cell_selector).map(|td| cell_text(&td)).collect();
        if let [label, cash_buy, cash_sell, spot_buy, spot_sell, ..] = cells.as_slice() {
            return Ok(CurrentRateSnapshot {
                currency_code: code.to_string(),
                currency_name: dedupe_label(label),
                cash_buy: cash_buy.clone(),
                cash_sell: cash_sell.clone(),
                spot_buy: spot_buy.clone(),
                spot_sell: spot_sell.clone(),
                observed_at,
            });
        }
    }

    Err(FxError::CurrencyNotFound(code.to_string()))
}

/// The board prints the label twice (desktop and phone layouts) in one cell.
fn dedupe_label(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();
    let half = words.len() / 2;
    if half > 0 && words.len() % 2 == 0 && words[..half] == words[half..] {
        words[..half].join(" ")
    } else {
        words.join(" ")
    }
}

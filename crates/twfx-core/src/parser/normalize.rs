//! Historical rate table normalizer
//!
//! The bank's quote pages render their history as a table with merged,
//! two-row headers whose labels drift between page versions, while the
//! column order within a layout stays put. Normalization therefore runs in
//! separate stages:
//!
//! 1. [`flatten_header`] folds a two-level header into one label per column.
//! 2. [`match_rate_labels`] assigns rate slots from unambiguous labels.
//! 3. [`fill_positional`] fills whatever is left from the fixed layout.
//! 4. [`normalize_history`] projects each row onto [`CanonicalRow`].
//!
//! Position wins over label text whenever the labels are ambiguous.

use tracing::debug;

use crate::error::{FxError, Result};
use crate::parser::table::{Header, RawTable};
use crate::types::{CanonicalRow, DayRate};

/// Inner labels for unlabelled tail columns, keyed by column index.
/// The source layout leaves these three header cells empty.
const TAIL_INNER_FALLBACKS: [(usize, &str); 3] = [(6, "本行買入"), (7, "本行賣出"), (8, "本行賣出")];

const DATE_MARKERS: [&str; 3] = ["日期", "掛牌", "date"];
const CURRENCY_MARKERS: [&str; 2] = ["幣別", "currency"];
const CASH_MARKERS: [&str; 2] = ["現金", "cash"];
const SPOT_MARKERS: [&str; 2] = ["即期", "spot"];
const BUY_MARKERS: [&str; 2] = ["買入", "buy"];
const SELL_MARKERS: [&str; 2] = ["賣出", "sell"];

/// Rate columns of the canonical schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSlot {
    CashBuy,
    CashSell,
    SpotBuy,
    SpotSell,
}

impl RateSlot {
    /// Slots in canonical column order
    pub const ALL: [RateSlot; 4] = [
        RateSlot::CashBuy,
        RateSlot::CashSell,
        RateSlot::SpotBuy,
        RateSlot::SpotSell,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Partial assignment of rate slots to column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateSlots([Option<usize>; 4]);

impl RateSlots {
    pub fn get(&self, slot: RateSlot) -> Option<usize> {
        self.0[slot.index()]
    }

    /// Assign a slot unless it is already taken. Returns whether it was set.
    pub fn fill(&mut self, slot: RateSlot, column: usize) -> bool {
        let entry = &mut self.0[slot.index()];
        if entry.is_some() {
            return false;
        }
        *entry = Some(column);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Column indices in slot order, if every slot is filled
    pub fn resolved(&self) -> Option<[usize; 4]> {
        let [a, b, c, d] = self.0;
        Some([a?, b?, c?, d?])
    }
}

/// Resolved column positions for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub currency: Option<usize>,
    /// cash_buy, cash_sell, spot_buy, spot_sell
    pub rates: [usize; 4],
}

impl ColumnMap {
    /// Column indices in canonical output order
    pub fn projection(&self) -> [usize; 5] {
        let [cb, cs, sb, ss] = self.rates;
        [self.date, cb, cs, sb, ss]
    }
}

/// Placeholder header text: empty, NaN-like, or a reader's "Unnamed: n".
fn is_placeholder(label: &str) -> bool {
    let label = label.trim();
    label.is_empty()
        || label.eq_ignore_ascii_case("nan")
        || label.to_ascii_lowercase().contains("unnamed")
}

fn meaningful(label: &str) -> Option<String> {
    let label = label.trim();
    (!is_placeholder(label)).then(|| label.to_string())
}

/// Outer/inner label per column after merged-cell propagation and the
/// tail fallbacks. `None` marks a label that is still missing.
fn resolve_levels(pairs: &[(String, String)]) -> Vec<(Option<String>, Option<String>)> {
    let mut current_outer: Option<String> = None;

    pairs
        .iter()
        .enumerate()
        .map(|(i, (outer, inner))| {
            let outer = match meaningful(outer) {
                Some(label) => {
                    current_outer = Some(label.clone());
                    Some(label)
                }
                None => current_outer.clone(),
            };

            let inner = meaningful(inner).or_else(|| {
                TAIL_INNER_FALLBACKS
                    .iter()
                    .find(|(idx, _)| *idx == i)
                    .map(|(_, label)| label.to_string())
            });

            (outer, inner)
        })
        .collect()
}

/// Fold a header into one label per column.
///
/// Two-level headers join outer and inner labels as `outer_inner`. A blank
/// outer label inherits the last non-blank outer label to its left, which is
/// how a merged cell spanning several sub-columns reads back. Columns with no
/// usable label become `Column_<i>`. `width` pads the result when the header
/// is narrower than the body.
pub fn flatten_header(header: &Header, width: usize) -> Vec<String> {
    let mut labels: Vec<String> = match header {
        Header::None => Vec::new(),
        Header::Single(labels) => labels
            .iter()
            .enumerate()
            .map(|(i, label)| meaningful(label).unwrap_or_else(|| placeholder(i)))
            .collect(),
        Header::TwoLevel(pairs) => resolve_levels(pairs)
            .into_iter()
            .enumerate()
            .map(|(i, levels)| match levels {
                (Some(outer), Some(inner)) if outer != inner => format!("{outer}_{inner}"),
                (Some(outer), _) => outer,
                (None, Some(inner)) => inner,
                (None, None) => placeholder(i),
            })
            .collect(),
    };

    let start = labels.len();
    labels.extend((start..width).map(placeholder));
    labels
}

fn placeholder(i: usize) -> String {
    format!("Column_{i}")
}

/// Columns whose inner label appears under more than one outer label.
///
/// On the bank's layout the cash and spot groups both use "本行買入" and
/// "本行賣出", so such a column is only identified by outer-label
/// propagation and its label cannot be trusted over its position.
pub fn shared_inner_labels(header: &Header, width: usize) -> Vec<bool> {
    let mut shared = vec![false; width];
    let Header::TwoLevel(pairs) = header else {
        return shared;
    };

    let levels = resolve_levels(pairs);
    for (i, (outer, inner)) in levels.iter().enumerate() {
        let Some(inner) = inner else { continue };
        let conflict = levels
            .iter()
            .any(|(o, n)| n.as_ref() == Some(inner) && o != outer);
        if conflict && i < width {
            shared[i] = true;
        }
    }
    shared
}

fn contains_any(label: &str, markers: &[&str]) -> bool {
    let lower = label.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}

/// First column whose label carries a date marker, else column 0.
pub fn find_date_column(labels: &[String]) -> usize {
    labels
        .iter()
        .position(|l| contains_any(l, &DATE_MARKERS))
        .unwrap_or(0)
}

/// First column whose label carries a currency marker.
pub fn find_currency_column(labels: &[String]) -> Option<usize> {
    labels.iter().position(|l| contains_any(l, &CURRENCY_MARKERS))
}

/// Rate slot named by a label, if it names exactly one.
fn classify(label: &str) -> Option<RateSlot> {
    let cash = contains_any(label, &CASH_MARKERS);
    let spot = contains_any(label, &SPOT_MARKERS);
    let buy = contains_any(label, &BUY_MARKERS);
    let sell = contains_any(label, &SELL_MARKERS);

    match (cash, spot, buy, sell) {
        (true, false, true, false) => Some(RateSlot::CashBuy),
        (true, false, false, true) => Some(RateSlot::CashSell),
        (false, true, true, false) => Some(RateSlot::SpotBuy),
        (false, true, false, true) => Some(RateSlot::SpotSell),
        _ => None,
    }
}

/// Tier 1: assign rate slots from labels.
///
/// Columns flagged in `skip` are never considered. The first matching
/// column wins each slot; later matches never overwrite it.
pub fn match_rate_labels(labels: &[String], skip: &[bool]) -> RateSlots {
    let mut slots = RateSlots::default();

    for (i, label) in labels.iter().enumerate() {
        if skip.get(i).copied().unwrap_or(false) {
            continue;
        }
        if let Some(slot) = classify(label) {
            slots.fill(slot, i);
        }
    }

    slots
}

/// Tier 2: fill unassigned slots from the fixed page layout.
///
/// A currency column at index 2 in a table of at least six columns marks
/// the layout whose rates sit at [2, 3, 4, 5]; every other layout uses
/// [1, 2, 3, 4]. Slots already assigned are kept.
pub fn fill_positional(mut slots: RateSlots, currency: Option<usize>, width: usize) -> RateSlots {
    if slots.is_complete() {
        return slots;
    }

    let positions: [usize; 4] = if currency == Some(2) && width >= 6 {
        [2, 3, 4, 5]
    } else {
        [1, 2, 3, 4]
    };

    for (slot, column) in RateSlot::ALL.into_iter().zip(positions) {
        slots.fill(slot, column);
    }
    slots
}

/// Locate the date and rate columns of a history table.
///
/// # Errors
/// `FxError::ParseError` when the result does not name five distinct
/// columns that exist in the table, or when a rate column is the currency
/// label column outside the layout that has rates at [2, 3, 4, 5].
pub fn identify_columns(table: &RawTable) -> Result<ColumnMap> {
    let width = table.width();
    if width == 0 {
        return Err(FxError::ParseError("table has no columns".to_string()));
    }
    let labels = flatten_header(&table.header, width);

    let date = find_date_column(&labels);
    let currency = find_currency_column(&labels);

    let mut skip = shared_inner_labels(&table.header, width);
    skip[date] = true;
    if let Some(currency) = currency {
        skip[currency] = true;
    }

    let by_label = match_rate_labels(&labels, &skip);
    let slots = fill_positional(by_label, currency, width);
    debug!(?labels, date, ?currency, ?by_label, ?slots, "identified columns");

    let rates = slots
        .resolved()
        .ok_or_else(|| FxError::ParseError("rate columns could not be resolved".to_string()))?;
    let map = ColumnMap {
        date,
        currency,
        rates,
    };

    let projection = map.projection();
    let distinct = projection
        .iter()
        .enumerate()
        .all(|(i, col)| !projection[..i].contains(col));
    if !distinct || projection.iter().any(|col| *col >= width) {
        return Err(FxError::ParseError(format!(
            "expected 5 distinct rate columns, table has {} ({:?})",
            width, projection
        )));
    }

    // Only the shifted-header layout reads rate data under the currency label.
    if let Some(currency) = currency {
        let shifted_layout = currency == 2 && width >= 6;
        if !shifted_layout && map.rates.contains(&currency) {
            return Err(FxError::ParseError(format!(
                "currency column {} selected as a rate column ({:?})",
                currency, map.rates
            )));
        }
    }

    Ok(map)
}

/// Normalize a history table into canonical rows.
///
/// # Errors
/// `FxError::ParseError` if the table has no rows, its columns cannot be
/// identified, or a row is too short for the selected columns. No partial
/// result is returned.
pub fn normalize_history(table: &RawTable) -> Result<Vec<CanonicalRow>> {
    if table.rows.is_empty() {
        return Err(FxError::ParseError("history table is empty".to_string()));
    }

    let map = identify_columns(table)?;
    let [date, cash_buy, cash_sell, spot_buy, spot_sell] = map.projection();

    table
        .rows
        .iter()
        .enumerate()
        .map(|(n, row)| {
            let cell = |col: usize| {
                row.get(col).cloned().ok_or_else(|| {
                    FxError::ParseError(format!(
                        "row {} has {} cells, column {} required",
                        n,
                        row.len(),
                        col
                    ))
                })
            };
            Ok(CanonicalRow {
                date: cell(date)?,
                cash_buy: cell(cash_buy)?,
                cash_sell: cell(cash_sell)?,
                spot_buy: cell(spot_buy)?,
                spot_sell: cell(spot_sell)?,
            })
        })
        .collect()
}

/// Normalize a single-day quote table into (type, rate) pairs.
///
/// Only the first two columns are used; cell text is passed through as is.
///
/// # Errors
/// `FxError::ParseError` if the table has no rows or fewer than two columns.
pub fn normalize_day(table: &RawTable) -> Result<Vec<DayRate>> {
    if table.rows.is_empty() {
        return Err(FxError::ParseError("day table is empty".to_string()));
    }

    table
        .rows
        .iter()
        .map(|row| match row.as_slice() {
            [kind, rate, ..] => Ok(DayRate {
                kind: kind.clone(),
                rate: rate.clone(),
            }),
            _ => Err(FxError::ParseError(format!(
                "day table needs 2 columns, row has {}",
                row.len()
            ))),
        })
        .collect()
}

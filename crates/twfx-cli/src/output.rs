//! Rendering of query results as JSON, CSV or an aligned text table.

use twfx_core::{CurrentRateSnapshot, HistoricalRates};

use crate::cli::OutputFormat;
use crate::error::CliError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_current(
    snapshot: &CurrentRateSnapshot,
    format: OutputFormat,
) -> Result<String, CliError> {
    let observed_at = snapshot.observed_at.format(TIMESTAMP_FORMAT).to_string();
    let fields: [(&str, &str); 7] = [
        ("currency_code", &snapshot.currency_code),
        ("currency_name", &snapshot.currency_name),
        ("cash_buy", &snapshot.cash_buy),
        ("cash_sell", &snapshot.cash_sell),
        ("spot_buy", &snapshot.spot_buy),
        ("spot_sell", &snapshot.spot_sell),
        ("observed_at", &observed_at),
    ];

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Csv => {
            let header: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
            let values: Vec<&str> = fields.iter().map(|(_, v)| *v).collect();
            to_csv(&header, &[values])
        }
        OutputFormat::Table => {
            let mut out = format!("{} live rates\n{}\n", snapshot.currency_name, "=".repeat(50));
            let key_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in &fields[2..] {
                out.push_str(&format!("{key:<key_width$} : {value}\n"));
            }
            Ok(out)
        }
    }
}

pub fn render_history(
    rates: &HistoricalRates,
    currency: &str,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rates)?),
        OutputFormat::Csv => to_csv(rates.columns(), &rates.records()),
        OutputFormat::Table => {
            let mut out = format!("{} historical rates\n{}\n", currency, "=".repeat(80));
            out.push_str(&align_table(rates.columns(), &rates.records()));
            Ok(out)
        }
    }
}

fn to_csv(header: &[&str], rows: &[Vec<&str>]) -> Result<String, CliError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Terminal columns taken by a string. Covers what the bank's pages print:
/// CJK and fullwidth forms take two columns, combining marks none, the rest one.
fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        0x0300..=0x036F | 0x200B..=0x200F | 0xFE00..=0xFE0F => 0,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

fn align_table(header: &[&str], rows: &[Vec<&str>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(display_width(cell));
            }
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(display_width(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        padded.join("  ").trim_end().to_string() + "\n"
    };

    let mut out = line(header);
    for row in rows {
        out.push_str(&line(row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use twfx_core::{CanonicalRow, DayRate};

    fn snapshot() -> CurrentRateSnapshot {
        serde_json::from_str(
            r#"{
                "currency_code": "USD",
                "currency_name": "美金 (USD)",
                "cash_buy": "32.26",
                "cash_sell": "32.93",
                "spot_buy": "32.635",
                "spot_sell": "32.735",
                "observed_at": "2025-01-24T09:30:00+08:00"
            }"#,
        )
        .unwrap()
    }

    fn series() -> HistoricalRates {
        HistoricalRates::Series(vec![
            CanonicalRow {
                date: "2025/01/24".to_string(),
                cash_buy: "32.26".to_string(),
                cash_sell: "32.93".to_string(),
                spot_buy: "32.635".to_string(),
                spot_sell: "32.735".to_string(),
            },
            CanonicalRow {
                date: "2025/01/23".to_string(),
                cash_buy: "-".to_string(),
                cash_sell: "-".to_string(),
                spot_buy: "32.68".to_string(),
                spot_sell: "32.78".to_string(),
            },
        ])
    }

    #[test]
    fn test_current_json() {
        let out = render_current(&snapshot(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["currency_code"], "USD");
        assert_eq!(value["spot_sell"], "32.735");
    }

    #[test]
    fn test_current_csv_has_header_and_one_row() {
        let out = render_current(&snapshot(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("currency_code,currency_name,cash_buy"));
        assert!(lines[1].starts_with("USD,美金 (USD),32.26,32.93,32.635,32.735,"));
    }

    #[test]
    fn test_current_table() {
        let out = render_current(&snapshot(), OutputFormat::Table).unwrap();
        assert!(out.starts_with("美金 (USD) live rates\n"));
        assert!(out.contains("spot_sell     : 32.735\n"));
    }

    #[test]
    fn test_history_json_is_array() {
        let out = render_history(&series(), "USD", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["cash_buy"], "-");
    }

    #[test]
    fn test_history_csv() {
        let out = render_history(&series(), "USD", OutputFormat::Csv).unwrap();
        assert_eq!(
            out,
            "date,cash_buy,cash_sell,spot_buy,spot_sell\n\
             2025/01/24,32.26,32.93,32.635,32.735\n\
             2025/01/23,-,-,32.68,32.78\n"
        );
    }

    #[test]
    fn test_history_table() {
        let out = render_history(&series(), "USD", OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "USD historical rates");
        assert_eq!(lines[2], "date        cash_buy  cash_sell  spot_buy  spot_sell");
        assert_eq!(lines[3], "2025/01/24  32.26     32.93      32.635    32.735");
        assert_eq!(lines[4], "2025/01/23  -         -          32.68     32.78");
    }

    #[test]
    fn test_day_table_counts_cjk_as_double_width() {
        let rates = HistoricalRates::Day(vec![DayRate {
            kind: "本行買入".to_string(),
            rate: "32.635".to_string(),
        }]);
        let out = render_history(&rates, "USD", OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "type      rate");
        assert_eq!(lines[3], "本行買入  32.635");
    }

    #[test]
    fn test_display_width_by_script() {
        assert_eq!(display_width("USD"), 3);
        assert_eq!(display_width("美金 (USD)"), 10);
        assert_eq!(display_width("Ｕ"), 2);
        assert_eq!(display_width("Zürich"), 6);
        assert_eq!(display_width("e\u{0301}"), 1);
        assert_eq!(display_width("€"), 1);
    }

    proptest! {
        #[test]
        fn prop_aligned_columns_start_at_same_offset(
            rows in prop::collection::vec(("[a-z0-9.]{1,12}", "[a-z0-9.]{1,12}"), 1..10)
        ) {
            let rows: Vec<Vec<&str>> = rows.iter().map(|(a, b)| vec![a.as_str(), b.as_str()]).collect();
            let out = align_table(&["k", "v"], &rows);
            // Offset of the second column on every line.
            let offsets: Vec<usize> = out
                .lines()
                .map(|l| {
                    let first = l.split_whitespace().next().map_or(0, str::len);
                    l.len() - l[first..].trim_start().len()
                })
                .collect();
            prop_assert!(offsets.windows(2).all(|w| w[0] == w[1]));
        }
    }
}

//! HTML parsers for rate.bot.com.tw pages
//!
//! - `table`: read the first HTML table into a raw grid with its header
//! - `normalize`: map raw history tables onto the canonical five columns
//! - `current`: pick one currency's row off the live rate board

pub mod current;
pub mod normalize;
pub mod table;

// Re-export main parsing functions
pub use current::extract_current_rate;
pub use normalize::{
    fill_positional, flatten_header, identify_columns, match_rate_labels, normalize_day,
    normalize_history, ColumnMap, RateSlot, RateSlots,
};
pub use table::{read_first_table, Header, RawTable};

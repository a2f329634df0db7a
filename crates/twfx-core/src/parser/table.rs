//! HTML table reader
//!
//! Turns the first `<table>` of a page into a [`RawTable`]: a dense grid of
//! cell strings plus an optional one- or two-level header. Merged cells
//! (`colspan`/`rowspan`) are expanded so every grid position carries the
//! text of the cell covering it, the same shape a spreadsheet reader yields.

use scraper::{ElementRef, Html, Selector};

use crate::error::{FxError, Result};

/// Upper bound for `colspan`/`rowspan`, guards against absurd attribute values
const MAX_SPAN: usize = 64;

/// Column header of a raw table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Header {
    /// No header rows were found
    #[default]
    None,
    /// One header row
    Single(Vec<String>),
    /// Two header rows as (outer, inner) per column
    TwoLevel(Vec<(String, String)>),
}

impl Header {
    /// Number of labelled columns
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(labels) => labels.len(),
            Self::TwoLevel(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A table as read from the page, before any column interpretation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub header: Header,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Header, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Number of columns: the widest of the header and every body row
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

/// One `<th>`/`<td>` before span expansion
struct Cell {
    text: String,
    colspan: usize,
    rowspan: usize,
}

/// Read the first table in an HTML document.
///
/// Header rows come from `<thead>`; without a thead, leading rows made only
/// of `<th>` cells are used instead. Two or more header rows produce a
/// [`Header::TwoLevel`] from the first two.
///
/// # Errors
/// `FxError::ParseError` if the document has no table or the table has no
/// data rows.
pub fn read_first_table(html: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| FxError::ParseError("no table found in page".to_string()))?;

    let mut header_rows = collect_rows(&table, "thead tr")?;
    let mut body_rows = collect_rows(&table, "tbody tr")?;

    if header_rows.is_empty() {
        let leading = body_rows.iter().take_while(|row| row.all_th).count();
        header_rows = body_rows.drain(..leading).collect();
    }

    let header_grid = expand_spans(header_rows.into_iter().map(|r| r.cells).collect());
    let rows: Vec<Vec<String>> = expand_spans(
        body_rows
            .into_iter()
            .filter(|r| r.has_td)
            .map(|r| r.cells)
            .collect(),
    );

    if rows.is_empty() {
        return Err(FxError::ParseError("table has no data rows".to_string()));
    }

    let width = header_grid
        .iter()
        .chain(rows.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let header = match header_grid.as_slice() {
        [] => Header::None,
        [single] => Header::Single(pad(single.clone(), width)),
        [outer, inner, ..] => {
            let outer = pad(outer.clone(), width);
            let inner = pad(inner.clone(), width);
            Header::TwoLevel(outer.into_iter().zip(inner).collect())
        }
    };

    let rows = rows.into_iter().map(|row| pad(row, width)).collect();
    Ok(RawTable { header, rows })
}

/// A `<tr>` with its cells and what kind of cells it holds
struct Row {
    cells: Vec<Cell>,
    all_th: bool,
    has_td: bool,
}

fn collect_rows(table: &ElementRef, css: &str) -> Result<Vec<Row>> {
    let row_selector = selector(css)?;
    let rows = table
        .select(&row_selector)
        .map(|tr| {
            let cells: Vec<(bool, Cell)> = tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| matches!(el.value().name(), "th" | "td"))
                .map(|el| (el.value().name() == "th", read_cell(&el)))
                .collect();
            Row {
                all_th: !cells.is_empty() && cells.iter().all(|(is_th, _)| *is_th),
                has_td: cells.iter().any(|(is_th, _)| !*is_th),
                cells: cells.into_iter().map(|(_, cell)| cell).collect(),
            }
        })
        .collect();
    Ok(rows)
}

fn read_cell(el: &ElementRef) -> Cell {
    Cell {
        text: cell_text(el),
        colspan: span_attr(el, "colspan"),
        rowspan: span_attr(el, "rowspan"),
    }
}

fn span_attr(el: &ElementRef, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}

/// Whitespace-collapsed text content of an element
pub fn cell_text(el: &ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lay rows out on a grid, repeating spanned cells into every position
/// they cover.
fn expand_spans(rows: Vec<Vec<Cell>>) -> Vec<Vec<String>> {
    // Per column: text still owed to following rows and how many rows remain.
    let mut carried: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for cells in rows {
        let mut out: Vec<String> = Vec::new();
        let mut cells = cells.into_iter();

        loop {
            let col = out.len();
            if let Some(slot) = carried.get_mut(col) {
                if let Some((text, remaining)) = slot.take() {
                    out.push(text.clone());
                    if remaining > 1 {
                        *slot = Some((text, remaining - 1));
                    }
                    continue;
                }
            }

            let Some(cell) = cells.next() else {
                // Rowspans still reaching past the last cell of this row.
                if carried[col.min(carried.len())..].iter().any(Option::is_some) {
                    out.push(String::new());
                    continue;
                }
                break;
            };

            for _ in 0..cell.colspan {
                let col = out.len();
                if cell.rowspan > 1 {
                    if carried.len() <= col {
                        carried.resize(col + 1, None);
                    }
                    carried[col] = Some((cell.text.clone(), cell.rowspan - 1));
                }
                out.push(cell.text.clone());
            }
        }

        grid.push(out);
    }

    grid
}

fn pad(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FxError::ParseError(format!("Invalid selector: {:?}", e)))
}

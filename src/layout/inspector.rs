use indexmap::IndexMap;

use crate::cellref::CellRef;
use crate::error::ExtractError;
use crate::excel::{CellType, Sheet};

/// Merged block above the header holding the table caption.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleRegion {
    pub rows: usize,
    pub cols: usize,
    pub text: String,
}

/// Column labels in column order, keyed by their header cell position.
/// Blank header cells keep their position with an empty label.
pub type HeaderRow = IndexMap<CellRef, String>;

#[derive(Clone, Debug)]
pub struct Layout {
    pub anchor: CellRef,
    pub title: Option<TitleRegion>,
    pub header: HeaderRow,
    pub subheader: Option<Vec<String>>,
}

impl Layout {
    #[must_use]
    pub fn title_rows(&self) -> usize {
        self.title.as_ref().map_or(0, |title| title.rows)
    }

    /// Row holding the column labels.
    #[must_use]
    pub fn header_row(&self) -> usize {
        1 + self.title_rows()
    }

    /// First row of record data.
    #[must_use]
    pub fn data_start_row(&self) -> usize {
        if self.subheader.is_some() {
            self.header_row() + 2
        } else {
            self.header_row() + 1
        }
    }
}

/// Probe order for the first content cell.
const ANCHOR_CANDIDATES: [(usize, usize); 3] = [(1, 1), (2, 1), (1, 2)];

/// Derive the sheet's layout: anchor cell, optional merged title, header
/// mapping, and optional sub-header labels.
pub fn inspect(sheet: &Sheet) -> Result<Layout, ExtractError> {
    let anchor = resolve_anchor(sheet)?;
    let title = detect_title(sheet, anchor);
    let title_rows = title.as_ref().map_or(0, |title| title.rows);
    let header = extract_header(sheet, anchor, title_rows);
    let subheader = detect_subheader(sheet, anchor, 1 + title_rows);

    Ok(Layout {
        anchor,
        title,
        header,
        subheader,
    })
}

fn resolve_anchor(sheet: &Sheet) -> Result<CellRef, ExtractError> {
    for (row, col) in ANCHOR_CANDIDATES {
        if !sheet.value(row, col).trim().is_empty() {
            return Ok(CellRef::new(row, col));
        }
    }

    Err(ExtractError::EmptyAnchor {
        sheet: sheet.name.clone(),
    })
}

/// A title exists iff the anchor cell belongs to a merged range; its span is
/// the merge's span and its text is the anchor value.
fn detect_title(sheet: &Sheet, anchor: CellRef) -> Option<TitleRegion> {
    let merge = sheet.merge_containing(anchor)?;

    Some(TitleRegion {
        rows: merge.row_span(),
        cols: merge.col_span(),
        text: sheet.value(anchor.row, anchor.col).to_string(),
    })
}

fn extract_header(sheet: &Sheet, anchor: CellRef, title_rows: usize) -> HeaderRow {
    let row = 1 + title_rows;
    let mut header = HeaderRow::new();

    for col in anchor.col..=sheet.max_cols {
        header.insert(CellRef::new(row, col), sheet.value(row, col).to_string());
    }

    header
}

/// Single-probe heuristic: the cell one row below the header at the sheet's
/// last column decides. Textual means a sub-header row; numeric or empty
/// means the data starts right after the header.
fn detect_subheader(sheet: &Sheet, anchor: CellRef, header_row: usize) -> Option<Vec<String>> {
    let probe_row = header_row + 1;
    let probe = sheet.cell(probe_row, sheet.max_cols)?;

    if probe.cell_type != CellType::Text || probe.value.is_empty() {
        return None;
    }

    Some(
        (anchor.col..=sheet.max_cols)
            .map(|col| sheet.value(probe_row, col).to_string())
            .collect(),
    )
}

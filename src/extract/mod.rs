use crate::excel::{Cell, Sheet};
use crate::filter::SelectionSet;
use crate::layout::Layout;

/// One extracted data row, keyed by its source row number.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub row: usize,
    pub values: Vec<Cell>,
}

/// Pull the selected rows in sheet order, each spanning the full data column
/// range from the anchor column to the sheet's last column.
#[must_use]
pub fn extract_records(sheet: &Sheet, layout: &Layout, selection: &SelectionSet) -> Vec<Record> {
    let rows = selection.rows();
    let mut records = Vec::with_capacity(rows.len());

    for row in layout.data_start_row()..=sheet.max_rows {
        if !rows.contains(&row) {
            continue;
        }

        let values = (layout.anchor.col..=sheet.max_cols)
            .map(|col| sheet.cell(row, col).cloned().unwrap_or_else(Cell::empty))
            .collect();

        records.push(Record { row, values });
    }

    records
}

use crate::excel::{Cell, Sheet};

/// Append a trailing column numbering the data rows 1..=N.
pub fn append_rank(sheet: &mut Sheet, data_start_row: usize) {
    let rank_col = sheet.max_cols + 1;
    let last_row = sheet.max_rows;

    for row in data_start_row..=last_row {
        let rank = row - data_start_row + 1;
        sheet.set_cell(row, rank_col, Cell::from_number(rank as f64));
    }
}

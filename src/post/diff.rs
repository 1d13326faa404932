use crate::error::ExtractError;
use crate::excel::{Cell, CellType, Sheet};
use crate::post::parse_column;

/// Append `second - first` per row as a new trailing column, labeled in the
/// header row (and the sub-header row, when the sheet has one).
///
/// Rows where either operand is non-numeric are left blank in the new column.
pub fn append_difference(
    sheet: &mut Sheet,
    first_column: &str,
    second_column: &str,
    column_name: &str,
    header_row: usize,
    subheader_row: Option<usize>,
) -> Result<(), ExtractError> {
    let first = parse_column(first_column)?;
    let second = parse_column(second_column)?;
    let target_col = sheet.max_cols + 1;
    let last_row = sheet.max_rows;

    for row in 1..=last_row {
        let (Some(a), Some(b)) = (
            sheet.cell(row, first).and_then(Cell::as_number),
            sheet.cell(row, second).and_then(Cell::as_number),
        ) else {
            continue;
        };

        sheet.set_cell(row, target_col, Cell::from_number(b - a));
    }

    let label = Cell::new_with_type(column_name.to_string(), CellType::Text, None);
    sheet.set_cell(header_row, target_col, label.clone());
    if let Some(row) = subheader_row {
        sheet.set_cell(row, target_col, label);
    }

    Ok(())
}

use crate::excel::{Cell, CellType, MergedRange, Sheet};
use crate::extract::Record;
use crate::layout::Layout;

/// Rebuild the extracted table as a fresh sheet.
///
/// The destination is always left-anchored at column 1 regardless of where
/// the source content started, and the title (when the source had one)
/// collapses to a single merged row. Rows stack in order: title, header,
/// sub-header, records, with absent pieces simply skipped, which yields the
/// four layout variants: data starting at row 3, 2, 4 or 3.
#[must_use]
pub fn build_destination(
    sheet_name: &str,
    title_text: &str,
    layout: &Layout,
    source_max_col: usize,
    records: &[Record],
) -> Sheet {
    let mut sheet = Sheet::new(sheet_name);
    let max_col = source_max_col - layout.anchor.col + 1;
    let mut row = 1;

    if layout.title.is_some() {
        if max_col > 1 {
            sheet.add_merge(MergedRange {
                first_row: 1,
                first_col: 1,
                last_row: 1,
                last_col: max_col,
            });
        }
        sheet.set_cell(
            1,
            1,
            Cell::new_with_type(title_text.to_string(), CellType::Text, None),
        );
        row += 1;
    }

    for (offset, label) in layout.header.values().enumerate() {
        if !label.is_empty() {
            sheet.set_cell(
                row,
                offset + 1,
                Cell::new_with_type(label.clone(), CellType::Text, None),
            );
        }
    }
    row += 1;

    if let Some(labels) = &layout.subheader {
        for (offset, label) in labels.iter().enumerate() {
            if !label.is_empty() {
                sheet.set_cell(
                    row,
                    offset + 1,
                    Cell::new_with_type(label.clone(), CellType::Text, None),
                );
            }
        }
        row += 1;
    }

    for record in records {
        for (offset, cell) in record.values.iter().enumerate() {
            if !cell.value.is_empty() {
                sheet.set_cell(row, offset + 1, cell.clone());
            }
        }
        row += 1;
    }

    sheet
}

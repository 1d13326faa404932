use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook};
use std::path::Path;

use crate::cellref::CellRef;
use crate::excel::{CellType, Sheet};

/// Persist a rebuilt sheet as a single-worksheet workbook.
///
/// This is the only write to disk in a run; every earlier stage operates on
/// the in-memory sheet, so a failed stage never leaves a partial file behind.
pub fn save_sheet(sheet: &Sheet, path: &Path) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet().set_name(&sheet.name)?;

    for col in 0..sheet.max_cols {
        worksheet.set_column_width(col as u16, 15)?;
    }

    for merge in &sheet.merges {
        let text = sheet.value(merge.first_row, merge.first_col);
        worksheet.merge_range(
            (merge.first_row - 1) as u32,
            (merge.first_col - 1) as u16,
            (merge.last_row - 1) as u32,
            (merge.last_col - 1) as u16,
            text,
            &Format::new(),
        )?;
    }

    for row in 1..sheet.data.len() {
        for col in 1..sheet.data[row].len() {
            let cell = &sheet.data[row][col];

            if cell.value.is_empty() {
                continue;
            }
            // merge_range already wrote the anchor value
            if sheet.merge_containing(CellRef::new(row, col)).is_some() {
                continue;
            }

            let row_idx = (row - 1) as u32;
            let col_idx = (col - 1) as u16;
            let format = cell.mark.map(|mark| {
                let format = Format::new().set_font_color(Color::RGB(mark.color));
                if mark.bold { format.set_bold() } else { format }
            });

            match cell.cell_type {
                CellType::Number => {
                    if let Ok(num) = cell.value.parse::<f64>() {
                        match &format {
                            Some(format) => {
                                worksheet.write_number_with_format(row_idx, col_idx, num, format)?;
                            }
                            None => {
                                worksheet.write_number(row_idx, col_idx, num)?;
                            }
                        }
                    } else {
                        worksheet.write_string(row_idx, col_idx, &cell.value)?;
                    }
                }
                CellType::Boolean => {
                    if let Ok(b) = cell.value.to_lowercase().parse::<bool>() {
                        worksheet.write_boolean(row_idx, col_idx, b)?;
                    } else {
                        worksheet.write_string(row_idx, col_idx, &cell.value)?;
                    }
                }
                _ => match &format {
                    Some(format) => {
                        worksheet.write_string_with_format(row_idx, col_idx, &cell.value, format)?;
                    }
                    None => {
                        worksheet.write_string(row_idx, col_idx, &cell.value)?;
                    }
                },
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Unable to save workbook: {}", path.display()))?;

    Ok(())
}

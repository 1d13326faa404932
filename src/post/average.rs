use crate::error::ExtractError;
use crate::excel::{Cell, Sheet};
use crate::post::parse_column;

/// How zero-valued cells participate in a column average.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AverageMode {
    /// Zeros count toward both sum and count.
    Normal,
    /// Zeros are excluded from both sum and count.
    NormalNoZero,
}

impl AverageMode {
    /// Parse the mode from its command-line spelling.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(AverageMode::Normal),
            "normal no zero" => Some(AverageMode::NormalNoZero),
            _ => None,
        }
    }
}

/// Write each listed column's arithmetic mean one row below the sheet's last
/// row. The average is computed once per column, after the full accumulation;
/// a column with no qualifying numeric cells is a reportable error rather
/// than a division by zero.
pub fn write_column_averages(
    sheet: &mut Sheet,
    columns: &[String],
    mode: AverageMode,
) -> Result<(), ExtractError> {
    // captured once so every average lands on the same row
    let last_row = sheet.max_rows;
    let target_row = last_row + 1;

    for column in columns {
        let col = parse_column(column)?;
        let mut total = 0.0;
        let mut count = 0usize;

        for row in 1..=last_row {
            let Some(value) = sheet.cell(row, col).and_then(Cell::as_number) else {
                continue;
            };
            if mode == AverageMode::NormalNoZero && value == 0.0 {
                continue;
            }

            total += value;
            count += 1;
        }

        if count == 0 {
            return Err(ExtractError::DegenerateAggregate {
                column: column.clone(),
            });
        }

        sheet.set_cell(target_row, col, Cell::from_number(total / count as f64));
    }

    Ok(())
}

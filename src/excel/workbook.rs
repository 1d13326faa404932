use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

use crate::excel::{Cell, CellType, DataTypeInfo, MergedRange, Sheet};

/// One opened source workbook, fully materialized for the duration of a run.
///
/// The file is read exactly once; every later stage works against the
/// in-memory sheets, so nothing holds the file open between stages.
pub struct SourceWorkbook {
    sheets: Vec<Sheet>,
    file_path: String,
}

pub fn open_source<P: AsRef<Path>>(path: P) -> Result<SourceWorkbook> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    let mut workbook: Xlsx<_> = open_workbook(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;
    workbook
        .load_merged_regions()
        .with_context(|| format!("Unable to read merged regions: {}", path_str))?;

    let sheet_names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        let mut sheet = sheet_from_range(name, &range);
        for (_, _, dimensions) in workbook.merged_regions_by_sheet(name) {
            sheet.add_merge(MergedRange {
                first_row: dimensions.start.0 as usize + 1,
                first_col: dimensions.start.1 as usize + 1,
                last_row: dimensions.end.0 as usize + 1,
                last_col: dimensions.end.1 as usize + 1,
            });
        }

        sheets.push(sheet);
    }

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in file");
    }

    Ok(SourceWorkbook {
        sheets,
        file_path: path_str,
    })
}

fn sheet_from_range(name: &str, range: &calamine::Range<Data>) -> Sheet {
    let (height, width) = range.get_size();

    // calamine trims the range to the used area; keep the offset so content
    // starting at B1 or A2 retains its true coordinates.
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let max_rows = row_offset + height;
    let max_cols = col_offset + width;
    let mut data = vec![vec![Cell::empty(); max_cols + 1]; max_rows + 1];

    for (row_idx, col_idx, cell) in range.used_cells() {
        let (value, cell_type, original_type) = match cell {
            Data::Empty => (String::new(), CellType::Empty, DataTypeInfo::Empty),

            Data::String(s) => (s.clone(), CellType::Text, DataTypeInfo::String),

            Data::Float(f) => {
                let value = if *f == (*f as i64) as f64 && f.abs() < 1e10 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                };
                (value, CellType::Number, DataTypeInfo::Float(*f))
            }

            Data::Int(i) => (i.to_string(), CellType::Number, DataTypeInfo::Int(*i)),

            Data::Bool(b) => (
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                },
                CellType::Boolean,
                DataTypeInfo::Bool(*b),
            ),

            Data::Error(e) => (format!("Error: {:?}", e), CellType::Text, DataTypeInfo::Error),

            // serial date: days since 1899-12-30
            Data::DateTime(dt) => (
                dt.as_f64().to_string(),
                CellType::Date,
                DataTypeInfo::DateTime(dt.as_f64()),
            ),

            Data::DateTimeIso(s) => (
                s.clone(),
                CellType::Date,
                DataTypeInfo::DateTimeIso(s.clone()),
            ),

            Data::DurationIso(s) => (
                s.clone(),
                CellType::Text,
                DataTypeInfo::DurationIso(s.clone()),
            ),
        };

        data[row_offset + row_idx + 1][col_offset + col_idx + 1] =
            Cell::new_with_type(value, cell_type, Some(original_type));
    }

    Sheet {
        name: name.to_string(),
        data,
        max_rows,
        max_cols,
        merges: Vec::new(),
    }
}

impl SourceWorkbook {
    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

use crate::error::ExtractError;
use crate::excel::{Cell, CellMark, Sheet};
use crate::post::parse_column;

/// Bold and color every cell holding its column's numeric maximum.
///
/// Ties are all marked, not just the first occurrence. An empty column list
/// means every column. Columns without numeric cells are skipped. Returns the
/// total number of marked cells.
pub fn mark_column_maxima(
    sheet: &mut Sheet,
    columns: &[String],
    color: u32,
) -> Result<usize, ExtractError> {
    let target_cols: Vec<usize> = if columns.is_empty() {
        (1..=sheet.max_cols).collect()
    } else {
        columns
            .iter()
            .map(|name| parse_column(name))
            .collect::<Result<_, _>>()?
    };

    let last_row = sheet.max_rows;
    let mut marked = 0;

    for col in target_cols {
        let mut max: Option<f64> = None;
        for row in 1..=last_row {
            if let Some(value) = sheet.cell(row, col).and_then(Cell::as_number) {
                max = Some(max.map_or(value, |current: f64| current.max(value)));
            }
        }
        let Some(max) = max else {
            continue;
        };

        for row in 1..=last_row {
            let Some(cell) = sheet.cell_mut(row, col) else {
                continue;
            };
            if cell.as_number() == Some(max) {
                cell.mark = Some(CellMark { color, bold: true });
                marked += 1;
            }
        }
    }

    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFF0000;

    #[test]
    fn ties_are_all_marked() {
        let mut sheet = Sheet::from_rows(
            "scores",
            &[vec!["10"], vec!["20"], vec!["20"], vec!["5"]],
        );

        let marked = mark_column_maxima(&mut sheet, &["A".to_string()], RED).unwrap();

        assert_eq!(marked, 2);
        assert_eq!(
            sheet.cell(2, 1).unwrap().mark,
            Some(CellMark {
                color: RED,
                bold: true
            })
        );
        assert_eq!(sheet.cell(3, 1).unwrap().mark, sheet.cell(2, 1).unwrap().mark);
        assert_eq!(sheet.cell(1, 1).unwrap().mark, None);
        assert_eq!(sheet.cell(4, 1).unwrap().mark, None);
    }

    #[test]
    fn empty_column_list_marks_every_column() {
        let mut sheet = Sheet::from_rows(
            "scores",
            &[vec!["10", "1"], vec!["20", "2"]],
        );

        let marked = mark_column_maxima(&mut sheet, &[], RED).unwrap();

        assert_eq!(marked, 2);
        assert!(sheet.cell(2, 1).unwrap().mark.is_some());
        assert!(sheet.cell(2, 2).unwrap().mark.is_some());
    }

    #[test]
    fn text_only_columns_are_skipped() {
        let mut sheet = Sheet::from_rows(
            "scores",
            &[vec!["Name"], vec!["Alice"], vec!["Bob"]],
        );

        let marked = mark_column_maxima(&mut sheet, &["A".to_string()], RED).unwrap();

        assert_eq!(marked, 0);
    }

    #[test]
    fn negative_maxima_are_found() {
        let mut sheet = Sheet::from_rows("scores", &[vec!["-10"], vec!["-3"], vec!["-7"]]);

        let marked = mark_column_maxima(&mut sheet, &["A".to_string()], RED).unwrap();

        assert_eq!(marked, 1);
        assert!(sheet.cell(2, 1).unwrap().mark.is_some());
    }

    #[test]
    fn bad_column_letters_are_rejected() {
        let mut sheet = Sheet::from_rows("scores", &[vec!["10"]]);

        let err = mark_column_maxima(&mut sheet, &["!".to_string()], RED).unwrap_err();

        assert!(matches!(err, ExtractError::InvalidColumn { .. }));
    }
}

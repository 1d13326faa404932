use crate::excel::{Cell, Sheet};

/// Re-type every cell whose value parses as a number; returns the number of
/// cells stored back as integers or floats.
///
/// Sheets hand-filled with string digits are common, so this runs before any
/// arithmetic pass. Unparseable cells are skipped silently.
pub fn coerce_numeric(sheet: &mut Sheet) -> usize {
    let mut coerced = 0;

    for row in 1..sheet.data.len() {
        for col in 1..sheet.data[row].len() {
            let cell = &sheet.data[row][col];
            if cell.value.is_empty() {
                continue;
            }

            let Ok(parsed) = cell.value.trim().parse::<f64>() else {
                continue;
            };

            let mark = cell.mark;
            let mut replacement = Cell::from_number(parsed);
            replacement.mark = mark;
            sheet.data[row][col] = replacement;
            coerced += 1;
        }
    }

    coerced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::{CellType, DataTypeInfo};

    #[test]
    fn string_digits_become_numbers() {
        let mut sheet = Sheet::new("scores");
        sheet.set_cell(
            1,
            1,
            Cell::new_with_type("90".to_string(), CellType::Text, Some(DataTypeInfo::String)),
        );
        sheet.set_cell(
            1,
            2,
            Cell::new_with_type("8.5".to_string(), CellType::Text, Some(DataTypeInfo::String)),
        );
        sheet.set_cell(2, 1, Cell::new("note".to_string()));

        let coerced = coerce_numeric(&mut sheet);

        assert_eq!(coerced, 2);
        assert_eq!(
            sheet.cell(1, 1).unwrap().original_type,
            Some(DataTypeInfo::Int(90))
        );
        assert_eq!(sheet.cell(1, 2).unwrap().as_number(), Some(8.5));
        assert_eq!(sheet.cell(2, 1).unwrap().cell_type, CellType::Text);
    }

    #[test]
    fn integral_floats_lose_their_fraction() {
        let mut sheet = Sheet::new("scores");
        sheet.set_cell(
            1,
            1,
            Cell::new_with_type("90.0".to_string(), CellType::Text, Some(DataTypeInfo::String)),
        );

        coerce_numeric(&mut sheet);

        assert_eq!(sheet.value(1, 1), "90");
    }

    #[test]
    fn non_numeric_cells_are_left_untouched() {
        let mut sheet = Sheet::from_rows(
            "scores",
            &[vec!["Name", "Joined"], vec!["Alice", "2024-06-01"]],
        );

        let coerced = coerce_numeric(&mut sheet);

        assert_eq!(coerced, 0);
        assert_eq!(sheet.value(2, 2), "2024-06-01");
        assert_eq!(sheet.cell(2, 2).unwrap().cell_type, CellType::Date);
    }
}

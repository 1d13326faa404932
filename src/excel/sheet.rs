use crate::cellref::CellRef;
use crate::excel::Cell;

/// Inclusive, 1-based merged cell block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergedRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl MergedRange {
    #[must_use]
    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row >= self.first_row
            && cell.row <= self.last_row
            && cell.col >= self.first_col
            && cell.col <= self.last_col
    }

    #[must_use]
    pub fn row_span(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    #[must_use]
    pub fn col_span(&self) -> usize {
        self.last_col - self.first_col + 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Cell grid with 1-based indexing; row 0 and column 0 are unused.
    pub data: Vec<Vec<Cell>>,
    pub max_rows: usize,
    pub max_cols: usize,
    pub merges: Vec<MergedRange>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: vec![vec![Cell::empty(); 1]; 1],
            max_rows: 0,
            max_cols: 0,
            merges: Vec::new(),
        }
    }

    /// Build a sheet from row-major string data, inferring cell types.
    #[must_use]
    pub fn from_rows<S: AsRef<str>>(name: &str, rows: &[Vec<S>]) -> Self {
        let mut sheet = Self::new(name);

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                let value = value.as_ref();
                if !value.is_empty() {
                    sheet.set_cell(row_idx + 1, col_idx + 1, Cell::new(value.to_string()));
                }
            }
        }

        sheet
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.data.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.data.get_mut(row)?.get_mut(col)
    }

    /// Display value at a coordinate; empty string outside the grid.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map_or("", |cell| cell.value.as_str())
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.ensure_cell_exists(row, col);

        let occupied = !cell.value.is_empty();
        self.data[row][col] = cell;

        if occupied {
            self.max_rows = self.max_rows.max(row);
            self.max_cols = self.max_cols.max(col);
        }
    }

    fn ensure_cell_exists(&mut self, row: usize, col: usize) {
        if row >= self.data.len() {
            let width = self.data.first().map_or(col + 1, Vec::len);
            self.data.resize_with(row + 1, || vec![Cell::empty(); width]);
        }

        if col >= self.data[0].len() {
            for row_data in &mut self.data {
                row_data.resize_with(col + 1, Cell::empty);
            }
        }
    }

    pub fn add_merge(&mut self, merge: MergedRange) {
        self.merges.push(merge);
    }

    #[must_use]
    pub fn merge_containing(&self, cell: CellRef) -> Option<&MergedRange> {
        self.merges.iter().find(|merge| merge.contains(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_expands_on_write_and_tracks_extents() {
        let mut sheet = Sheet::new("scores");
        sheet.set_cell(3, 2, Cell::new("90".to_string()));

        assert_eq!(sheet.max_rows, 3);
        assert_eq!(sheet.max_cols, 2);
        assert_eq!(sheet.value(3, 2), "90");
        assert_eq!(sheet.value(1, 1), "");
        assert_eq!(sheet.value(100, 100), "");
    }

    #[test]
    fn empty_writes_do_not_extend_the_used_area() {
        let mut sheet = Sheet::new("scores");
        sheet.set_cell(5, 5, Cell::empty());

        assert_eq!(sheet.max_rows, 0);
        assert_eq!(sheet.max_cols, 0);
    }

    #[test]
    fn merge_membership_is_inclusive() {
        let merge = MergedRange {
            first_row: 1,
            first_col: 1,
            last_row: 2,
            last_col: 4,
        };

        assert!(merge.contains(CellRef::new(1, 1)));
        assert!(merge.contains(CellRef::new(2, 4)));
        assert!(!merge.contains(CellRef::new(3, 1)));
        assert_eq!(merge.row_span(), 2);
        assert_eq!(merge.col_span(), 4);
    }

    #[test]
    fn from_rows_places_values_one_based() {
        let sheet = Sheet::from_rows("scores", &[vec!["Name", "Score"], vec!["Alice", "90"]]);

        assert_eq!(sheet.value(1, 1), "Name");
        assert_eq!(sheet.value(2, 2), "90");
        assert_eq!(sheet.max_rows, 2);
        assert_eq!(sheet.max_cols, 2);
    }
}

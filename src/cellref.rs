use std::fmt;

use crate::error::ExtractError;

/// 1-based sheet coordinate.
///
/// Business logic carries coordinates in this structured form; the A1-style
/// textual form only appears at the user-facing edges (CLI column arguments,
/// error messages).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Format as an A1-style address (e.g. A1, B2, AA10).
    #[must_use]
    pub fn to_a1(self) -> String {
        format!("{}{}", index_to_col_name(self.col), self.row)
    }

    /// Parse an A1-style address back into a coordinate.
    pub fn parse(address: &str) -> Result<Self, ExtractError> {
        let invalid = || ExtractError::InvalidCellAddress {
            address: address.to_string(),
        };

        let split = address
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = address.split_at(split);

        let col = col_name_to_index(letters).ok_or_else(invalid)?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

#[must_use]
pub fn index_to_col_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    if col_name.is_empty() {
        col_name.push('A');
    }

    col_name
}

#[must_use]
pub fn col_name_to_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }

    let mut result = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }

        let val = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        result = result * 26 + val;
    }

    Some(result)
}

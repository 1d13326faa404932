/// Font styling requested by the marking pass, materialized at save time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMark {
    pub color: u32,
    pub bold: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: String,
    pub cell_type: CellType,
    pub original_type: Option<DataTypeInfo>,
    pub mark: Option<CellMark>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellType {
    Text,
    Number,
    Date,
    Boolean,
    Empty,
}

/// Type information as reported by calamine, kept so values round-trip
/// through the rebuilt workbook without losing their original type.
#[derive(Clone, Debug, PartialEq)]
pub enum DataTypeInfo {
    Empty,
    String,
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(f64),
    DateTimeIso(String),
    DurationIso(String),
    Error,
}

impl Cell {
    pub fn new(value: String) -> Self {
        let cell_type = if value.is_empty() {
            CellType::Empty
        } else if value.parse::<f64>().is_ok() {
            CellType::Number
        } else if (value.contains('/') && value.split('/').count() == 3)
            || (value.contains('-') && value.split('-').count() == 3)
        {
            CellType::Date
        } else if value == "true" || value == "false" {
            CellType::Boolean
        } else {
            CellType::Text
        };

        Self::new_with_type(value, cell_type, None)
    }

    pub fn new_with_type(
        value: String,
        cell_type: CellType,
        original_type: Option<DataTypeInfo>,
    ) -> Self {
        Self {
            value,
            cell_type,
            original_type,
            mark: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            value: String::new(),
            cell_type: CellType::Empty,
            original_type: Some(DataTypeInfo::Empty),
            mark: None,
        }
    }

    /// Numeric cell with the shortest faithful display form: integral values
    /// render without a decimal point.
    #[must_use]
    pub fn from_number(value: f64) -> Self {
        let display = if value == (value as i64) as f64 && value.abs() < 1e10 {
            (value as i64).to_string()
        } else {
            value.to_string()
        };
        let original_type = if value.fract() == 0.0 && value.abs() < 1e10 {
            DataTypeInfo::Int(value as i64)
        } else {
            DataTypeInfo::Float(value)
        };

        Self::new_with_type(display, CellType::Number, Some(original_type))
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.cell_type == CellType::Number
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        if self.cell_type == CellType::Number {
            self.value.parse().ok()
        } else {
            None
        }
    }
}

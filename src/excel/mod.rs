mod cell;
mod sheet;
mod workbook;
mod writer;

pub use cell::{Cell, CellMark, CellType, DataTypeInfo};
pub use sheet::{MergedRange, Sheet};
pub use workbook::{SourceWorkbook, open_source};
pub use writer::save_sheet;

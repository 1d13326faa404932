mod average;
mod coerce;
mod diff;
mod mark;
mod rank;

pub use average::{AverageMode, write_column_averages};
pub use coerce::coerce_numeric;
pub use diff::append_difference;
pub use mark::mark_column_maxima;
pub use rank::append_rank;

use crate::cellref::col_name_to_index;
use crate::error::ExtractError;

pub(crate) fn parse_column(name: &str) -> Result<usize, ExtractError> {
    col_name_to_index(name).ok_or_else(|| ExtractError::InvalidColumn {
        column: name.to_string(),
    })
}

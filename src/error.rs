use thiserror::Error;

/// Errors surfaced by the extraction pipeline stages.
///
/// Structural failures (`EmptyAnchor`, a missing name column) abort the run
/// before anything is persisted; post-processing failures are isolated to the
/// pass that raised them.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("sheet '{sheet}' has no content at A1, A2 or B1")]
    EmptyAnchor { sheet: String },

    #[error("header of sheet '{sheet}' has no '{field}' column")]
    MissingHeaderField { sheet: String, field: String },

    #[error("multiple {kind} candidates match '{keyword}': {}", .candidates.join(", "))]
    AmbiguousSelection {
        kind: String,
        keyword: String,
        candidates: Vec<String>,
    },

    #[error("no workbook matching '{keyword}' found in {directory}")]
    WorkbookNotFound { keyword: String, directory: String },

    #[error("worksheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("invalid column reference: {column}")]
    InvalidColumn { column: String },

    #[error("invalid cell address: {address}")]
    InvalidCellAddress { address: String },

    #[error("invalid averaging mode: {mode}")]
    InvalidMode { mode: String },

    #[error("column {column} has no qualifying numeric cells to average")]
    DegenerateAggregate { column: String },
}

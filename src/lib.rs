//! Layout inference and record extraction for semi-structured Excel score
//! sheets: locate a workbook, infer title/header/sub-header placement, filter
//! records by school and class, and rebuild the survivors into a fresh,
//! layout-consistent workbook with optional post-processing passes.

pub mod cellref;
pub mod error;
pub mod excel;
pub mod extract;
pub mod filter;
pub mod layout;
pub mod locate;
pub mod post;

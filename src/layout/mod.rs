mod builder;
mod inspector;

pub use builder::build_destination;
pub use inspector::{HeaderRow, Layout, TitleRegion, inspect};

//! Terminal output rendering.

mod table;

pub use table::Table;

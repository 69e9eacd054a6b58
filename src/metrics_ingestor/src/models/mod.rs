pub mod index;
pub mod metric;

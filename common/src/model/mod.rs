pub mod csv;
pub mod field;

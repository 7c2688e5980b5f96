pub mod load;
pub mod tables;

pub use load::{copy_statements, insert_statements};
pub use tables::{create_statements, drop_statements, Table, TABLES};

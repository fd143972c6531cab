pub mod certificates;
pub mod records;

pub mod colleges;
pub mod trends;

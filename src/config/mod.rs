pub mod catalog;
pub mod descriptor;

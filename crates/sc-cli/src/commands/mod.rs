pub mod export;
pub mod fields;
pub mod next;
pub mod records;
pub mod reset;
pub mod show;

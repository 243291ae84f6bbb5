pub mod course;
pub mod filter;

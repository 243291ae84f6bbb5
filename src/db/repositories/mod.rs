pub mod cache;
pub mod course;

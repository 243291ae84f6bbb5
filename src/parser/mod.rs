pub mod amount;
pub mod question;

pub use question::parse_question;

pub mod error;
pub mod issue;
pub mod types;

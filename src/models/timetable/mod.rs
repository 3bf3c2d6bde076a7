pub mod csv;
pub mod parser;
pub mod queries;
pub mod types;

pub use queries::*;
pub use types::*;

pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::{card::*, set::*, value::*};
pub use parsing::{ParseError, adapt::*, blocks::*, cursor::*, scanner::*};

/// Chess domain types and the rule engine.
pub mod chess;
/// Assorted utilities.
pub mod util;

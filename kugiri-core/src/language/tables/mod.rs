//! Runtime tables for language rules
//!
//! Tables are built once per rule set and only read afterwards.

pub mod enclosure;
pub mod terminator;
pub mod words;

pub use enclosure::{EncTable, EnclosureInfo, Role};
pub use terminator::TermTable;
pub use words::WordTable;

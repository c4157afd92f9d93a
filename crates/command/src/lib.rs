//! Free-text command interpretation.
//!
//! This crate turns an instruction like `"use 10 units of ethanol"` into a
//! structured [`ParsedCommand`], and fuzzy-matches resource tokens against
//! the catalog's known names. Both components are pure: no IO, no state
//! mutation, deterministic output for a given input.

pub mod parser;
pub mod resolver;

pub use parser::{CommandParser, ParsedCommand};
pub use resolver::{DEFAULT_CUTOFF, NameResolver};

//! Front-end protocol handling.
//!
//! This module implements the line-oriented command protocol the engine
//! speaks over stdin/stdout: the command parser for the main loop and the
//! JSON state snapshot the `dump` command emits.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::{snapshot, to_json, MatchSnapshot, TacticianSnapshot, UnitSnapshot};

//! Skirmish engine library.
//!
//! Exposes the board representation, match rules, and protocol modules for
//! use by integration tests and the binary entry point.

pub mod board;
pub mod engine;
pub mod game;
pub mod protocol;

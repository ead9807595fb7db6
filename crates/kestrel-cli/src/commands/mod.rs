//! CLI command implementations.

pub mod common;
pub mod compare;
pub mod describe;
pub mod transpile;

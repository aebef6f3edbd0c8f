//! Shared utilities for the gomoku server workspace.

pub mod logger;
pub mod time;

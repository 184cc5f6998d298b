//! CLI command handlers

pub mod commands;

pub use commands::{counter, recognize, show, submit, track_error};

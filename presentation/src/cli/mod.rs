//! CLI definitions and interactive prompts.

pub mod commands;
pub mod prompt;

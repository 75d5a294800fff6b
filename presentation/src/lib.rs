//! Presentation layer for leafscan
//!
//! This crate contains CLI definitions, output formatters, the analysis
//! progress spinner, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, Command, ProfileAction};
pub use cli::prompt::prompt_line;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::Spinner;

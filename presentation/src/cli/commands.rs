//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for leafscan
#[derive(Parser, Debug)]
#[command(name = "leafscan")]
#[command(author, version, about = "Crop disease identification from your terminal")]
#[command(long_about = r#"
LeafScan sends a plant photo to a remote classification service and shows the
diagnosis (disease, symptoms, treatment) as a chat conversation.

Configuration files are loaded from (in priority order):
1. LEAFSCAN_* environment variables
2. --config <path>     Explicit config file
3. ./leafscan.toml     Project-level config
4. ~/.config/leafscan/config.toml   Global config

Example:
  leafscan login grower@example.com
  leafscan analyze photos/tomato-leaf.jpg
  leafscan analyze --camera
  leafscan chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password, or via Google OAuth
    Login {
        #[arg(required_unless_present = "google")]
        email: Option<String>,

        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Log in through Google instead (prints the URL to open, then
        /// prompts for the callback code)
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google: bool,
    },

    /// Create an account and log in
    Signup {
        email: String,

        #[arg(long)]
        password: Option<String>,

        /// Display name (defaults to the email's local part)
        #[arg(long)]
        name: Option<String>,
    },

    /// Log out and clear the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Analyze a plant image
    Analyze {
        /// Path to a JPG or PNG image
        image: Option<PathBuf>,

        /// Capture from the camera instead (falls back to IMAGE if given)
        #[arg(long)]
        camera: bool,

        /// Free-text note to send along with the image
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Interactive diagnosis chat
    Chat,

    /// List past diagnosis sessions
    History {
        /// Also pull sessions from the server first
        #[arg(long)]
        sync: bool,
    },

    /// Show or update the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show the profile (default)
    Show,

    /// Update name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Upload a new profile picture
    SetImage { image: PathBuf },
}

//! Configuration file loading for leafscan
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `LEAFSCAN_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./leafscan.toml` or `./.leafscan.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/leafscan/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{BackendConfig, CaptureConfig, ConfigValidationError, FileConfig};
pub use loader::ConfigLoader;

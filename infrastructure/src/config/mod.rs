//! Configuration file loading for revchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `REVCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./revchat.toml` or `./.revchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/revchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAuthConfig, FileChatConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileServerConfig,
};
pub use loader::ConfigLoader;

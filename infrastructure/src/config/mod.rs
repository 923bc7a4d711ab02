//! Configuration file loading for toolloop
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLLOOP_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolloop.toml` or `./.toolloop.toml`
//! 4. Global: `~/.config/toolloop/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig, FileProviderConfig,
    FileToolsConfig, ResolvedConfig,
};
pub use loader::ConfigLoader;

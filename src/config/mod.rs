#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, LocalStorage};
pub use toml_config::{PlatformConfig, ProjectConfig, StorageConfig};

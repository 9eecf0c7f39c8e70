pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LocalStorage};

pub use adapters::http::HttpPlatformClient;
pub use config::StorageConfig;
pub use crate::core::{
    storage::{encode_key, PlatformStorage},
    xliff::XliffConverter,
    IndexMode, Message, MessageCatalogue, Project, Storage, TransferOptions, TransferableStorage,
};
pub use utils::error::{ApiError, Result, StorageError};

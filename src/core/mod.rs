pub mod notes;
pub mod storage;
pub mod wire;
pub mod xliff;

#[cfg(test)]
pub(crate) mod fake;

pub use crate::domain::model::{IndexMode, Message, MessageCatalogue, Project, TransferOptions};
pub use crate::domain::ports::{
    AssetApi, CatalogueConverter, ExportApi, ImportApi, PlatformClient, Storage,
    TransferableStorage, TranslationApi,
};
pub use crate::utils::error::Result;

use crate::domain::model::{Message, MessageCatalogue, TransferOptions};
use crate::domain::remote::{
    Asset, AssetPatch, ExportParams, ImportParams, ImportReceipt, RemoteTranslation,
};
use crate::utils::error::{ApiResult, Result};
use async_trait::async_trait;

/// Per-message access to translations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// `Ok(None)` when no translation exists for the key and locale.
    async fn get(&self, locale: &str, domain: &str, key: &str) -> Result<Option<Message>>;
    async fn create(&self, message: &Message) -> Result<()>;
    async fn update(&self, message: &Message) -> Result<()>;
    async fn delete(&self, locale: &str, domain: &str, key: &str) -> Result<()>;
}

/// Bulk transfer of whole catalogues.
#[async_trait]
pub trait TransferableStorage: Send + Sync {
    /// Fills `catalogue` with everything the storage holds for its locale.
    async fn export(&self, catalogue: &mut MessageCatalogue, options: &TransferOptions)
        -> Result<()>;
    /// Pushes the content of `catalogue` to the storage.
    async fn import(&self, catalogue: &MessageCatalogue, options: &TransferOptions) -> Result<()>;
}

#[async_trait]
pub trait AssetApi: Send + Sync {
    async fn create_asset(&self, api_key: &str, id: &str) -> ApiResult<Asset>;
    async fn patch_asset(&self, api_key: &str, id: &str, patch: &AssetPatch) -> ApiResult<()>;
    async fn tag_asset(&self, api_key: &str, id: &str, tag: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait TranslationApi: Send + Sync {
    async fn get_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
    ) -> ApiResult<RemoteTranslation>;
    async fn create_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
        translation: &str,
    ) -> ApiResult<()>;
    async fn delete_translation(&self, api_key: &str, id: &str, locale: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Returns the raw exported document for one locale.
    async fn export_locale(
        &self,
        api_key: &str,
        locale: &str,
        extension: &str,
        params: &ExportParams,
    ) -> ApiResult<String>;
}

#[async_trait]
pub trait ImportApi: Send + Sync {
    async fn import(
        &self,
        api_key: &str,
        extension: &str,
        body: String,
        params: &ImportParams,
    ) -> ApiResult<ImportReceipt>;
}

/// Everything the storage adapter needs from the platform.
pub trait PlatformClient: AssetApi + TranslationApi + ExportApi + ImportApi {}

impl<T> PlatformClient for T where T: AssetApi + TranslationApi + ExportApi + ImportApi {}

/// Converts between catalogues and the bulk transfer document format.
pub trait CatalogueConverter: Send + Sync {
    fn content_to_catalogue(&self, content: &str, locale: &str, domain: &str)
        -> Result<MessageCatalogue>;
    fn catalogue_to_content(
        &self,
        catalogue: &MessageCatalogue,
        domain: &str,
        options: &TransferOptions,
    ) -> Result<String>;
}

//! In-memory platform used by the unit tests. Records every call and keeps
//! enough state to answer the way the real platform does.

use crate::domain::ports::{AssetApi, ExportApi, ImportApi, TranslationApi};
use crate::domain::remote::{
    Asset, AssetPatch, ExportParams, ImportParams, ImportReceipt, RemoteTranslation,
};
use crate::utils::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateAsset {
        api_key: String,
        id: String,
    },
    PatchAsset {
        api_key: String,
        id: String,
        patch: AssetPatch,
    },
    TagAsset {
        api_key: String,
        id: String,
        tag: String,
    },
    GetTranslation {
        api_key: String,
        id: String,
        locale: String,
    },
    CreateTranslation {
        api_key: String,
        id: String,
        locale: String,
        translation: String,
    },
    DeleteTranslation {
        api_key: String,
        id: String,
        locale: String,
    },
    ExportLocale {
        api_key: String,
        locale: String,
        extension: String,
        params: ExportParams,
    },
    Import {
        api_key: String,
        extension: String,
        body: String,
        params: ImportParams,
    },
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    assets: HashMap<String, Asset>,
    tags: HashMap<String, Vec<String>>,
    translations: HashMap<(String, String), String>,
    exports: HashMap<String, String>,
    failing_status: Option<u16>,
}

#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_translation(&self, id: &str, locale: &str, translation: &str) {
        let mut state = self.state.lock().await;
        state.assets.insert(
            id.to_string(),
            Asset {
                id: id.to_string(),
                notes: String::new(),
            },
        );
        state
            .translations
            .insert((id.to_string(), locale.to_string()), translation.to_string());
    }

    pub async fn seed_export(&self, api_key: &str, content: &str) {
        let mut state = self.state.lock().await;
        state.exports.insert(api_key.to_string(), content.to_string());
    }

    /// Every subsequent call answers with this status.
    pub async fn fail_with_status(&self, status: u16) {
        self.state.lock().await.failing_status = Some(status);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn has_asset(&self, id: &str) -> bool {
        self.state.lock().await.assets.contains_key(id)
    }

    pub async fn translation(&self, id: &str, locale: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .translations
            .get(&(id.to_string(), locale.to_string()))
            .cloned()
    }

    pub async fn tags(&self, id: &str) -> Vec<String> {
        let state = self.state.lock().await;
        state.tags.get(id).cloned().unwrap_or_default()
    }

    pub async fn notes(&self, id: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .assets
            .get(id)
            .map(|a| a.notes.clone())
            .filter(|n| !n.is_empty())
    }
}

impl State {
    fn record(&mut self, call: Call) -> ApiResult<()> {
        self.calls.push(call);
        match self.failing_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn require_asset(&mut self, id: &str) -> ApiResult<&mut Asset> {
        self.assets
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("asset {}", id)))
    }
}

#[async_trait]
impl AssetApi for FakePlatform {
    async fn create_asset(&self, api_key: &str, id: &str) -> ApiResult<Asset> {
        let mut state = self.state.lock().await;
        state.record(Call::CreateAsset {
            api_key: api_key.to_string(),
            id: id.to_string(),
        })?;

        if state.assets.contains_key(id) {
            return Err(ApiError::Conflict(id.to_string()));
        }
        let asset = Asset {
            id: id.to_string(),
            notes: String::new(),
        };
        state.assets.insert(id.to_string(), asset.clone());
        Ok(asset)
    }

    async fn patch_asset(&self, api_key: &str, id: &str, patch: &AssetPatch) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Call::PatchAsset {
            api_key: api_key.to_string(),
            id: id.to_string(),
            patch: patch.clone(),
        })?;

        let asset = state.require_asset(id)?;
        if let Some(notes) = &patch.notes {
            asset.notes = notes.clone();
        }
        Ok(())
    }

    async fn tag_asset(&self, api_key: &str, id: &str, tag: &str) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Call::TagAsset {
            api_key: api_key.to_string(),
            id: id.to_string(),
            tag: tag.to_string(),
        })?;

        state.require_asset(id)?;
        let tags = state.tags.entry(id.to_string()).or_default();
        let mut unique: BTreeSet<String> = tags.drain(..).collect();
        unique.insert(tag.to_string());
        tags.extend(unique);
        Ok(())
    }
}

#[async_trait]
impl TranslationApi for FakePlatform {
    async fn get_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
    ) -> ApiResult<RemoteTranslation> {
        let mut state = self.state.lock().await;
        state.record(Call::GetTranslation {
            api_key: api_key.to_string(),
            id: id.to_string(),
            locale: locale.to_string(),
        })?;

        state
            .translations
            .get(&(id.to_string(), locale.to_string()))
            .map(|translation| RemoteTranslation {
                id: id.to_string(),
                translation: translation.clone(),
                translated: !translation.is_empty(),
            })
            .ok_or_else(|| ApiError::NotFound(format!("{} in {}", id, locale)))
    }

    async fn create_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
        translation: &str,
    ) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Call::CreateTranslation {
            api_key: api_key.to_string(),
            id: id.to_string(),
            locale: locale.to_string(),
            translation: translation.to_string(),
        })?;

        state.require_asset(id)?;
        state
            .translations
            .insert((id.to_string(), locale.to_string()), translation.to_string());
        Ok(())
    }

    async fn delete_translation(&self, api_key: &str, id: &str, locale: &str) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Call::DeleteTranslation {
            api_key: api_key.to_string(),
            id: id.to_string(),
            locale: locale.to_string(),
        })?;

        state
            .translations
            .remove(&(id.to_string(), locale.to_string()))
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("{} in {}", id, locale)))
    }
}

#[async_trait]
impl ExportApi for FakePlatform {
    async fn export_locale(
        &self,
        api_key: &str,
        locale: &str,
        extension: &str,
        params: &ExportParams,
    ) -> ApiResult<String> {
        let mut state = self.state.lock().await;
        state.record(Call::ExportLocale {
            api_key: api_key.to_string(),
            locale: locale.to_string(),
            extension: extension.to_string(),
            params: params.clone(),
        })?;

        state
            .exports
            .get(api_key)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("export of {}", locale)))
    }
}

#[async_trait]
impl ImportApi for FakePlatform {
    async fn import(
        &self,
        api_key: &str,
        extension: &str,
        body: String,
        params: &ImportParams,
    ) -> ApiResult<ImportReceipt> {
        let mut state = self.state.lock().await;
        state.record(Call::Import {
            api_key: api_key.to_string(),
            extension: extension.to_string(),
            body,
            params: params.clone(),
        })?;

        Ok(ImportReceipt {
            message: Some("Import queued".to_string()),
            progress: None,
        })
    }
}

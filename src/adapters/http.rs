//! reqwest client for the translation platform REST API.
//!
//! Every request carries `Authorization: Loco <api key>`; ids and locales are
//! sent as percent-encoded path segments.

use crate::domain::ports::{AssetApi, ExportApi, ImportApi, TranslationApi};
use crate::domain::remote::{
    Asset, AssetPatch, ExportParams, ImportParams, ImportReceipt, RemoteTranslation,
};
use crate::utils::error::{ApiError, ApiResult, Result, StorageError};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://localise.biz/api";

#[derive(Debug, Clone)]
pub struct HttpPlatformClient {
    base_url: Url,
    http: Client,
}

impl HttpPlatformClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| StorageError::InvalidConfigValueError {
            field: "platform.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StorageError::InvalidConfigValueError {
                field: "platform.base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::from)?;

        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, api_key: &str, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!("Making API request: {} {}", method, url);
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Loco {}", api_key))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Uses the `error` field of a JSON error body when there is one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl AssetApi for HttpPlatformClient {
    async fn create_asset(&self, api_key: &str, id: &str) -> ApiResult<Asset> {
        let request = self
            .request(Method::POST, api_key, &["assets"])
            .form(&[("id", id)]);
        self.send_json(request).await
    }

    async fn patch_asset(&self, api_key: &str, id: &str, patch: &AssetPatch) -> ApiResult<()> {
        let resource = format!("{}.json", id);
        let request = self
            .request(Method::PATCH, api_key, &["assets", &resource])
            .json(patch);
        self.send(request).await?;
        Ok(())
    }

    async fn tag_asset(&self, api_key: &str, id: &str, tag: &str) -> ApiResult<()> {
        let request = self
            .request(Method::POST, api_key, &["assets", id, "tags"])
            .form(&[("name", tag)]);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl TranslationApi for HttpPlatformClient {
    async fn get_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
    ) -> ApiResult<RemoteTranslation> {
        let request = self.request(Method::GET, api_key, &["translations", id, locale]);
        self.send_json(request).await
    }

    async fn create_translation(
        &self,
        api_key: &str,
        id: &str,
        locale: &str,
        translation: &str,
    ) -> ApiResult<()> {
        let request = self
            .request(Method::POST, api_key, &["translations", id, locale])
            .body(translation.to_string());
        self.send(request).await?;
        Ok(())
    }

    async fn delete_translation(&self, api_key: &str, id: &str, locale: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, api_key, &["translations", id, locale]);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ExportApi for HttpPlatformClient {
    async fn export_locale(
        &self,
        api_key: &str,
        locale: &str,
        extension: &str,
        params: &ExportParams,
    ) -> ApiResult<String> {
        let resource = format!("{}.{}", locale, extension);
        let request = self
            .request(Method::GET, api_key, &["export", "locale", &resource])
            .query(&params.query_pairs());
        Ok(self.send(request).await?.text().await?)
    }
}

#[async_trait]
impl ImportApi for HttpPlatformClient {
    async fn import(
        &self,
        api_key: &str,
        extension: &str,
        body: String,
        params: &ImportParams,
    ) -> ApiResult<ImportReceipt> {
        let request = self
            .request(Method::POST, api_key, &["import", extension])
            .query(&params.query_pairs())
            .body(body);
        let text = self.send(request).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(ImportReceipt::default());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

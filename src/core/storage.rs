use crate::core::notes;
use crate::core::wire;
use crate::core::xliff::XliffConverter;
use crate::domain::model::{IndexMode, Message, MessageCatalogue, Project, TransferOptions};
use crate::domain::ports::{CatalogueConverter, PlatformClient, Storage, TransferableStorage};
use crate::domain::remote::{AssetPatch, ExportParams, ImportParams};
use crate::utils::error::{ApiError, Result, StorageError};
use async_trait::async_trait;

/// Document format requested from and sent to the platform.
const TRANSFER_EXTENSION: &str = "xliff";
/// Flavour of XLIFF the export endpoint should produce.
const EXPORT_FORMAT: &str = "symfony";
/// Source locale the platform reads as "units are keyed by opaque id".
const IDENTITY_LOCALE: &str = "x-id";

/// Builds the platform asset id for a key of a domain.
pub fn encode_key(domain: &str, key: &str) -> String {
    format!("{}.{}", domain, key)
}

/// Translation storage backed by a remote translation platform.
pub struct PlatformStorage<C: PlatformClient, X: CatalogueConverter = XliffConverter> {
    client: C,
    converter: X,
    projects: Vec<Project>,
}

impl<C: PlatformClient> PlatformStorage<C, XliffConverter> {
    pub fn new(client: C, projects: Vec<Project>) -> Self {
        Self::with_converter(client, projects, XliffConverter::new())
    }
}

impl<C: PlatformClient, X: CatalogueConverter> PlatformStorage<C, X> {
    pub fn with_converter(client: C, projects: Vec<Project>, converter: X) -> Self {
        Self {
            client,
            converter,
            projects,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// First project owning `domain`. Duplicate ownership is not detected.
    pub fn resolve(&self, domain: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|project| project.has_domain(domain))
            .ok_or_else(|| StorageError::ProjectNotFound {
                domain: domain.to_string(),
            })
    }

    async fn create_asset_and_translation(&self, message: &Message) -> Result<()> {
        let project = self.resolve(&message.domain)?;
        let api_key = project.api_key();
        let token = encode_key(&message.domain, &message.key);

        let is_new_asset = match self.client.create_asset(api_key, &token).await {
            Ok(_) => true,
            Err(ApiError::Conflict(_)) => {
                tracing::debug!("Asset {} already exists", token);
                false
            }
            Err(e) => return Err(e.into()),
        };

        // An untranslated placeholder carries its own encoded key.
        let translation = if message.translation == token {
            ""
        } else {
            message.translation.as_str()
        };

        if is_new_asset {
            self.client
                .create_translation(api_key, &token, &message.locale, translation)
                .await?;
        } else {
            match self
                .client
                .get_translation(api_key, &token, &message.locale)
                .await
            {
                Ok(_) => {
                    tracing::debug!(
                        "Keeping existing {} translation of {}",
                        message.locale,
                        token
                    );
                }
                Err(ApiError::NotFound(_)) => {
                    self.client
                        .create_translation(api_key, &token, &message.locale, translation)
                        .await?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.client
            .tag_asset(api_key, &token, &message.domain)
            .await?;

        if let Some(parameters) = message.meta("parameters").filter(|p| !notes::is_blank(p)) {
            let patch = AssetPatch {
                notes: Some(notes::render_parameters(parameters)?),
            };
            self.client.patch_asset(api_key, &token, &patch).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl<C: PlatformClient, X: CatalogueConverter> Storage for PlatformStorage<C, X> {
    async fn get(&self, locale: &str, domain: &str, key: &str) -> Result<Option<Message>> {
        let project = self.resolve(domain)?;
        let token = encode_key(domain, key);
        tracing::debug!("Fetching {} translation of {}", locale, token);

        match self
            .client
            .get_translation(project.api_key(), &token, locale)
            .await
        {
            Ok(remote) => Ok(Some(Message::new(key, domain, locale, remote.translation))),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, message: &Message) -> Result<()> {
        tracing::debug!(
            "Creating {}.{} ({})",
            message.domain,
            message.key,
            message.locale
        );
        self.create_asset_and_translation(message).await
    }

    async fn update(&self, message: &Message) -> Result<()> {
        let project = self.resolve(&message.domain)?;
        let token = encode_key(&message.domain, &message.key);

        match self
            .client
            .create_translation(
                project.api_key(),
                &token,
                &message.locale,
                &message.translation,
            )
            .await
        {
            Ok(()) => Ok(()),
            Err(ApiError::NotFound(_)) => {
                tracing::debug!("Asset {} missing, falling back to create", token);
                self.create_asset_and_translation(message).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, locale: &str, domain: &str, key: &str) -> Result<()> {
        let project = self.resolve(domain)?;
        let token = encode_key(domain, key);
        tracing::debug!("Deleting {} translation of {}", locale, token);

        self.client
            .delete_translation(project.api_key(), &token, locale)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<C: PlatformClient, X: CatalogueConverter> TransferableStorage for PlatformStorage<C, X> {
    async fn export(
        &self,
        catalogue: &mut MessageCatalogue,
        _options: &TransferOptions,
    ) -> Result<()> {
        let locale = catalogue.locale().to_string();

        for project in &self.projects {
            for domain in project.domains() {
                let params = ExportParams {
                    format: Some(EXPORT_FORMAT.to_string()),
                    index: project.index(),
                    status: project.status().map(str::to_string),
                    filter: project.is_multi_domain().then(|| domain.clone()),
                };

                let data = match self
                    .client
                    .export_locale(project.api_key(), &locale, TRANSFER_EXTENSION, &params)
                    .await
                {
                    Ok(data) => data,
                    Err(ApiError::NotFound(_)) => {
                        tracing::debug!("Nothing to export for {} ({})", domain, locale);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                let cleaned = wire::strip_source_prefixes(&data);
                let exported = self
                    .converter
                    .content_to_catalogue(&cleaned, &locale, domain)?;
                tracing::info!(
                    "📥 Exported {} messages for {} ({})",
                    exported.len(),
                    domain,
                    locale
                );
                catalogue.add_catalogue(exported)?;
            }
        }

        Ok(())
    }

    async fn import(&self, catalogue: &MessageCatalogue, options: &TransferOptions) -> Result<()> {
        let locale = catalogue.locale();

        for project in &self.projects {
            for domain in project.domains() {
                let mut options = options.clone();
                if project.index() == IndexMode::Id {
                    options.default_locale = Some(IDENTITY_LOCALE.to_string());
                }

                let content = self
                    .converter
                    .catalogue_to_content(catalogue, domain, &options)?;
                let body = wire::namespace_unit_ids(&content, domain);

                let params = ImportParams {
                    locale: locale.to_string(),
                    asynchronous: true,
                    index: project.index(),
                    tag_all: project.is_multi_domain().then(|| domain.clone()),
                };

                let receipt = self
                    .client
                    .import(project.api_key(), TRANSFER_EXTENSION, body, &params)
                    .await?;
                tracing::info!(
                    "📤 Import of {} ({}) accepted: {}",
                    domain,
                    locale,
                    receipt
                        .progress
                        .or(receipt.message)
                        .unwrap_or_else(|| "no progress reported".to_string())
                );
            }
        }

        Ok(())
    }
}

use crate::domain::model::{Message, MessageCatalogue, TransferOptions};
use crate::domain::ports::CatalogueConverter;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "platform-storage")]
#[command(about = "Read and write translations stored on a remote translation platform")]
pub struct CliConfig {
    #[arg(long, default_value = "platform-storage.toml")]
    pub config: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print one translation
    Get(MessageRef),
    /// Create the asset and its translation, keeping any existing translation
    Create(MessageArgs),
    /// Overwrite a translation, creating the asset when missing
    Update(MessageArgs),
    /// Delete one translation
    Delete(MessageRef),
    /// Download every configured domain into XLIFF files
    Export {
        #[arg(long)]
        locale: String,
        #[arg(long, default_value = "./translations")]
        output: String,
    },
    /// Upload XLIFF files for every configured domain
    Import {
        #[arg(long)]
        locale: String,
        #[arg(long, default_value = "./translations")]
        input: String,
        #[arg(long, help = "Source language written into the uploaded files")]
        default_locale: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MessageRef {
    #[arg(long)]
    pub locale: String,
    #[arg(long, default_value = "messages")]
    pub domain: String,
    #[arg(long)]
    pub key: String,
}

#[derive(Debug, Clone, Args)]
pub struct MessageArgs {
    #[command(flatten)]
    pub target: MessageRef,

    #[arg(long)]
    pub translation: String,

    /// Placeholder names shown as notes on the platform
    #[arg(long = "parameter")]
    pub parameters: Vec<String>,
}

impl MessageArgs {
    pub fn to_message(&self) -> Message {
        let message = Message::new(
            self.target.key.as_str(),
            self.target.domain.as_str(),
            self.target.locale.as_str(),
            self.translation.as_str(),
        );
        if self.parameters.is_empty() {
            message
        } else {
            message.with_meta("parameters", serde_json::json!(self.parameters))
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Export { output, .. } => validate_path("output", output),
            Command::Import { input, .. } => validate_path("input", input),
            _ => Ok(()),
        }
    }
}

/// XLIFF files on disk, one per domain and locale: `{domain}.{locale}.xlf`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn file_path(&self, domain: &str, locale: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.{}.xlf", domain, locale))
    }

    /// Writes every populated domain of `catalogue`, returning the written paths.
    pub fn write_catalogue<X: CatalogueConverter>(
        &self,
        catalogue: &MessageCatalogue,
        converter: &X,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.base_path)?;

        let mut written = Vec::new();
        for domain in catalogue.domains() {
            let content =
                converter.catalogue_to_content(catalogue, domain, &TransferOptions::default())?;
            let path = self.file_path(domain, catalogue.locale());
            fs::write(&path, content)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Loads the files present for `domains`; missing files are skipped.
    pub fn read_catalogue<X: CatalogueConverter>(
        &self,
        locale: &str,
        domains: &[String],
        converter: &X,
    ) -> Result<MessageCatalogue> {
        let mut catalogue = MessageCatalogue::new(locale);
        for domain in domains {
            let path = self.file_path(domain, locale);
            if !path.exists() {
                tracing::debug!("No file for {} at {}", domain, path.display());
                continue;
            }
            let content = fs::read_to_string(&path)?;
            catalogue.add_catalogue(converter.content_to_catalogue(&content, locale, domain)?)?;
        }
        Ok(catalogue)
    }
}

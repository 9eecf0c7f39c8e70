//! Payloads exchanged with the translation platform.

use crate::domain::model::IndexMode;
use serde::{Deserialize, Serialize};

/// Platform record for a translation key, independent of locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTranslation {
    pub id: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub translated: bool,
}

/// Query parameters of a locale export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParams {
    pub format: Option<String>,
    pub index: IndexMode,
    pub status: Option<String>,
    pub filter: Option<String>,
}

impl ExportParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(format) = &self.format {
            pairs.push(("format", format.clone()));
        }
        pairs.push(("index", self.index.as_str().to_string()));
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        pairs
    }
}

/// Query parameters of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportParams {
    pub locale: String,
    pub asynchronous: bool,
    pub index: IndexMode,
    pub tag_all: Option<String>,
}

impl ImportParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("locale", self.locale.clone()),
            ("index", self.index.as_str().to_string()),
        ];
        if self.asynchronous {
            pairs.push(("async", "1".to_string()));
        }
        if let Some(tag) = &self.tag_all {
            pairs.push(("tag-all", tag.clone()));
        }
        pairs
    }
}

/// Acknowledgement of an import request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
}

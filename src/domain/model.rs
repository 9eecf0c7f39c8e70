use crate::utils::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// How the platform keys assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Assets are addressed by an opaque identifier.
    Id,
    /// Assets are addressed by their literal source string.
    #[default]
    #[serde(alias = "key")]
    Text,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Id => "id",
            IndexMode::Text => "text",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(IndexMode::Id),
            "text" | "key" => Ok(IndexMode::Text),
            other => Err(StorageError::InvalidConfigValueError {
                field: "index".to_string(),
                value: other.to_string(),
                reason: "Expected one of: id, text, key".to_string(),
            }),
        }
    }
}

/// A platform project and the domains it hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    api_key: String,
    domains: Vec<String>,
    index: IndexMode,
    status: Option<String>,
    multi_domain: bool,
}

impl Project {
    /// The multi-domain flag starts out as `domains.len() > 1`.
    pub fn new<I, S>(api_key: impl Into<String>, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains: Vec<String> = domains.into_iter().map(Into::into).collect();
        let multi_domain = domains.len() > 1;
        Self {
            api_key: api_key.into(),
            domains,
            index: IndexMode::default(),
            status: None,
            multi_domain,
        }
    }

    pub fn with_index(mut self, index: IndexMode) -> Self {
        self.index = index;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_multi_domain(mut self, multi_domain: bool) -> Self {
        self.multi_domain = multi_domain;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn index(&self) -> IndexMode {
        self.index
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Multi-domain projects express domain membership through asset tags.
    pub fn is_multi_domain(&self) -> bool {
        self.multi_domain
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    pub domain: String,
    pub locale: String,
    pub translation: String,
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
}

impl Message {
    pub fn new(
        key: impl Into<String>,
        domain: impl Into<String>,
        locale: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            domain: domain.into(),
            locale: locale.into(),
            translation: translation.into(),
            meta: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(name.into(), value);
        self
    }

    pub fn meta(&self, name: &str) -> Option<&serde_json::Value> {
        self.meta.get(name)
    }
}

/// Translations of a single locale, grouped by domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalogue {
    locale: String,
    messages: BTreeMap<String, BTreeMap<String, String>>,
}

impl MessageCatalogue {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: BTreeMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn domains(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).collect()
    }

    pub fn all(&self, domain: &str) -> Option<&BTreeMap<String, String>> {
        self.messages.get(domain)
    }

    pub fn get(&self, domain: &str, key: &str) -> Option<&str> {
        self.messages
            .get(domain)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    pub fn has(&self, domain: &str, key: &str) -> bool {
        self.get(domain, key).is_some()
    }

    pub fn set(
        &mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.messages
            .entry(domain.into())
            .or_default()
            .insert(key.into(), translation.into());
    }

    /// Merges `other` into this catalogue. Values from `other` replace
    /// existing ones for the same domain and key.
    pub fn add_catalogue(&mut self, other: MessageCatalogue) -> Result<()> {
        if other.locale != self.locale {
            return Err(StorageError::LocaleMismatch {
                expected: self.locale.clone(),
                found: other.locale,
            });
        }

        for (domain, messages) in other.messages {
            self.messages.entry(domain).or_default().extend(messages);
        }
        Ok(())
    }

    /// Number of translations across all domains.
    pub fn len(&self) -> usize {
        self.messages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn messages(&self, domain: &str) -> Vec<Message> {
        self.messages
            .get(domain)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, translation)| {
                        Message::new(key.as_str(), domain, self.locale.as_str(), translation.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Options shared by export, import and the catalogue converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Written as the XLIFF `source-language`. Falls back to the catalogue locale.
    pub default_locale: Option<String>,
}

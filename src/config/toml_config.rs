use crate::adapters::http::{HttpPlatformClient, DEFAULT_BASE_URL};
use crate::domain::model::{IndexMode, Project};
use crate::utils::error::{Result, StorageError};
use crate::utils::validation::{
    validate_api_key, validate_base_url, validate_domain, validate_timeout, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub platform: PlatformConfig,
    pub projects: Vec<ProjectConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub api_key: String,
    pub domains: Vec<String>,
    #[serde(default)]
    pub index: IndexMode,
    pub status: Option<String>,
    pub multi_domain: Option<bool>,
}

impl ProjectConfig {
    pub fn to_project(&self) -> Project {
        let mut project =
            Project::new(self.api_key.as_str(), self.domains.iter().map(String::as_str))
                .with_index(self.index);
        if let Some(status) = &self.status {
            project = project.with_status(status.as_str());
        }
        if let Some(multi_domain) = self.multi_domain {
            project = project.with_multi_domain(multi_domain);
        }
        project
    }
}

impl StorageConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StorageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StorageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOCO_API_KEY})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_REFERENCE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_base_url("platform.base_url", &self.platform.base_url)?;

        if let Some(timeout) = self.platform.timeout_seconds {
            validate_timeout("platform.timeout_seconds", timeout)?;
        }

        if self.projects.is_empty() {
            return Err(StorageError::MissingConfigError {
                field: "projects".to_string(),
            });
        }

        for (i, project) in self.projects.iter().enumerate() {
            validate_api_key(&format!("projects[{}].api_key", i), &project.api_key)?;

            if project.domains.is_empty() {
                return Err(StorageError::MissingConfigError {
                    field: format!("projects[{}].domains", i),
                });
            }
            for domain in &project.domains {
                validate_domain(&format!("projects[{}].domains", i), domain)?;
            }
        }

        // 重複的 domain 不視為錯誤：解析時以第一個專案為準
        for (domain, owners) in self.domain_owners() {
            if owners.len() > 1 {
                tracing::warn!(
                    "⚠️ Domain {} is listed by projects {:?}; project {} wins",
                    domain,
                    owners,
                    owners[0]
                );
            }
        }

        Ok(())
    }

    /// Indexes of the projects listing each domain, in configuration order.
    pub fn domain_owners(&self) -> HashMap<&str, Vec<usize>> {
        let mut owners: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, project) in self.projects.iter().enumerate() {
            for domain in &project.domains {
                let entry = owners.entry(domain.as_str()).or_default();
                if !entry.contains(&i) {
                    entry.push(i);
                }
            }
        }
        owners
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.iter().map(ProjectConfig::to_project).collect()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.platform.timeout_seconds.map(Duration::from_secs)
    }

    /// 建立對應平台設定的 HTTP 客戶端
    pub fn http_client(&self) -> Result<HttpPlatformClient> {
        HttpPlatformClient::with_timeout(&self.platform.base_url, self.timeout())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

use thiserror::Error;

/// Errors reported by a platform client.
///
/// The set is closed on purpose so callers can branch on the response class
/// instead of inspecting status codes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Asset already exists: {0}")]
    Conflict(String),

    #[error("Platform responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Project not found for domain \"{domain}\"")]
    ProjectNotFound { domain: String },

    #[error("Platform request failed: {0}")]
    Api(#[from] ApiError),

    #[error("XLIFF processing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalogue locale mismatch: expected {expected}, found {found}")]
    LocaleMismatch { expected: String, found: String },

    #[error("Invalid catalogue content: {message}")]
    InvalidCatalogue { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl StorageError {
    /// True when the error is a platform "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Api(e) if e.is_not_found())
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StorageError::ProjectNotFound { .. }
                | StorageError::ConfigValidationError { .. }
                | StorageError::InvalidConfigValueError { .. }
                | StorageError::MissingConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StorageError::ProjectNotFound { .. } => {
                "Add the domain to the `domains` list of one of the configured projects"
            }
            StorageError::Api(ApiError::NotFound(_)) => {
                "Check that the asset and locale exist on the platform"
            }
            StorageError::Api(ApiError::Conflict(_)) => "The asset already exists; use update instead",
            StorageError::Api(ApiError::Status { status, .. }) if *status == 401 || *status == 403 => {
                "Verify the project's api_key"
            }
            StorageError::Api(_) => "Check network connectivity and the platform base_url",
            StorageError::Xml(_) | StorageError::InvalidCatalogue { .. } => {
                "Make sure the file is valid XLIFF 1.2"
            }
            StorageError::Yaml(_) => "Check the message parameters metadata",
            StorageError::IoError(_) => "Check file paths and permissions",
            StorageError::LocaleMismatch { .. } => "Merge catalogues of the same locale only",
            StorageError::ConfigValidationError { .. }
            | StorageError::InvalidConfigValueError { .. }
            | StorageError::MissingConfigError { .. } => "Fix the configuration file and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

use crate::utils::error::{Result, StorageError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> StorageError {
    StorageError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The platform root must be an absolute http(s) URL that path segments can be appended to.
pub fn validate_base_url(field: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            raw,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(invalid(field, raw, "URL cannot be used as a base"));
    }
    Ok(())
}

pub fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(invalid(field, seconds, "Timeout must be at least 1 second"));
    }
    Ok(())
}

/// Rejects blank keys and unexpanded `${VAR}` references.
pub fn validate_api_key(field: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(invalid(field, key, "API key cannot be empty"));
    }
    if key.contains("${") {
        return Err(invalid(field, key, "Unresolved environment variable reference"));
    }
    Ok(())
}

pub fn validate_domain(field: &str, domain: &str) -> Result<()> {
    if domain.trim().is_empty() {
        return Err(invalid(field, domain, "Domain name cannot be blank"));
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes"));
    }
    Ok(())
}

//! Configuration validation logic.

use crate::config::loader::{Config, CredentialsConfig, RateLimitConfig, MAX_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_filename;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_credentials(&config.credentials)?;
    validate_page_size(config.options.page_size)?;
    validate_rate_limits(&config.rate_limits)?;
    validate_directory_name("likes_directory", &config.options.likes_directory)?;
    validate_directory_name("following_directory", &config.options.following_directory)?;

    Ok(())
}

/// Validate the four OAuth credentials.
///
/// The error names which values were provided, never the values themselves.
pub fn validate_credentials(credentials: &CredentialsConfig) -> Result<()> {
    let fields = [
        ("consumer_key", &credentials.consumer_key),
        ("consumer_secret", &credentials.consumer_secret),
        ("access_token", &credentials.access_token),
        ("access_secret", &credentials.access_secret),
    ];

    if fields.iter().any(|(_, value)| value.trim().is_empty()) {
        let provided: Vec<String> = fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, !value.trim().is_empty()))
            .collect();
        return Err(Error::MissingConfig(format!(
            "consumer key/secret and access token/secret required, got {}",
            provided.join(", ")
        )));
    }

    for (name, value) in fields {
        let lower = value.to_lowercase();
        if lower.contains("replaceme") || lower.contains("xxxxxxxx") {
            return Err(Error::ConfigValidation {
                field: name.to_string(),
                message: "Value appears to be a placeholder. Please provide the value from the developer portal."
                    .to_string(),
            });
        }
    }

    Ok(())
}

/// Validate the page size against the API cap.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, page_size
            ),
        });
    }

    Ok(())
}

/// Validate quotas and the window they apply to.
pub fn validate_rate_limits(limits: &RateLimitConfig) -> Result<()> {
    for (field, value) in [
        ("likes_requests", limits.likes_requests as u64),
        ("following_requests", limits.following_requests as u64),
        ("window_seconds", limits.window_seconds),
    ] {
        if value == 0 {
            return Err(Error::ConfigValidation {
                field: field.to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate a resource directory name.
pub fn validate_directory_name(field: &str, name: &str) -> Result<()> {
    sanitize_filename(name).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> CredentialsConfig {
        CredentialsConfig {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = Config::default();
        config.credentials = credentials();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_credentials_reports_presence() {
        let mut creds = credentials();
        creds.access_secret.clear();

        let err = validate_credentials(&creds).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("consumer_key: true"));
        assert!(message.contains("access_secret: false"));
        assert!(!message.contains("xvz1evFS4wEEPTGEFPHBog"));
    }

    #[test]
    fn test_placeholder_credentials() {
        let mut creds = credentials();
        creds.consumer_key = "XXXXXXXXXXXXX".to_string();
        assert!(validate_credentials(&creds).is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(200).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(201).is_err());
    }

    #[test]
    fn test_zero_quota_rejected() {
        let limits = RateLimitConfig {
            following_requests: 0,
            ..Default::default()
        };
        assert!(validate_rate_limits(&limits).is_err());
    }

    #[test]
    fn test_directory_name_traversal() {
        assert!(validate_directory_name("likes_directory", "likes").is_ok());
        assert!(validate_directory_name("likes_directory", "../likes").is_err());
        assert!(validate_directory_name("likes_directory", "a/b").is_err());
    }
}

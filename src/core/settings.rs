//! Destination title settings
//!
//! `TitleSettings.json` names the title the run publishes to. Loading and
//! validating it is a hard gate: nothing is uploaded without a title id,
//! secret key, and default catalog name.

use crate::core::error::PublishError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// Destination title and credentials
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TitleSettings {
    pub title_id: String,

    /// Admin API secret key. Kept behind `secrecy` so it cannot leak into
    /// log lines or debug output.
    pub developer_secret_key: SecretString,

    /// Name of the default catalog the economy phase publishes to
    pub catalog_name: String,
}

impl TitleSettings {
    /// Masked secret key for log output: first and last 3 characters only,
    /// short keys fully masked.
    pub fn masked_secret(&self) -> String {
        let chars: Vec<char> = self.developer_secret_key.expose_secret().chars().collect();
        if chars.len() < 10 {
            return "****".to_string();
        }
        let prefix: String = chars[..3].iter().collect();
        let suffix: String = chars[chars.len() - 3..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }

    fn validate(&self) -> Result<(), PublishError> {
        if self.title_id.trim().is_empty() {
            return Err(PublishError::InvalidSettings {
                reason: "TitleIdが設定されていません".to_string(),
            });
        }
        if self.developer_secret_key.expose_secret().trim().is_empty() {
            return Err(PublishError::InvalidSettings {
                reason: "DeveloperSecretKeyが設定されていません".to_string(),
            });
        }
        if self.catalog_name.trim().is_empty() {
            return Err(PublishError::InvalidSettings {
                reason: "CatalogNameが設定されていません".to_string(),
            });
        }
        Ok(())
    }
}

/// Load and validate `TitleSettings.json`
pub async fn load_title_settings(path: &Path) -> Result<TitleSettings, PublishError> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| PublishError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let settings: TitleSettings =
        serde_json::from_str(&contents).map_err(|source| PublishError::FileParse {
            path: path.to_path_buf(),
            source,
        })?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_and_load(json: &str) -> Result<TitleSettings, PublishError> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("TitleSettings.json");
        std::fs::write(&path, json).unwrap();
        load_title_settings(&path).await
    }

    #[tokio::test]
    async fn test_load_valid_settings() {
        let settings = write_and_load(
            r#"{"TitleId": "AB12", "DeveloperSecretKey": "SECRETSECRETKEY1", "CatalogName": "CharacterClasses"}"#,
        )
        .await
        .unwrap();

        assert_eq!(settings.title_id, "AB12");
        assert_eq!(settings.catalog_name, "CharacterClasses");
        assert_eq!(
            settings.developer_secret_key.expose_secret(),
            "SECRETSECRETKEY1"
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_parse_error() {
        let result =
            write_and_load(r#"{"TitleId": "AB12", "DeveloperSecretKey": "SECRETKEY123456"}"#).await;

        assert!(matches!(result, Err(PublishError::FileParse { .. })));
    }

    #[tokio::test]
    async fn test_empty_title_id_rejected() {
        let result = write_and_load(
            r#"{"TitleId": "", "DeveloperSecretKey": "SECRETKEY123456", "CatalogName": "Main"}"#,
        )
        .await;

        assert!(matches!(result, Err(PublishError::InvalidSettings { .. })));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_title_settings(&temp_dir.path().join("TitleSettings.json")).await;

        assert!(matches!(result, Err(PublishError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_masked_secret_hides_middle() {
        let settings = write_and_load(
            r#"{"TitleId": "AB12", "DeveloperSecretKey": "ABCDEF123456", "CatalogName": "Main"}"#,
        )
        .await
        .unwrap();

        assert_eq!(settings.masked_secret(), "ABC...456");
    }

    #[tokio::test]
    async fn test_masked_secret_handles_multibyte_keys() {
        // Validation allows any non-empty key, so masking must not assume
        // single-byte characters
        let settings = write_and_load(
            r#"{"TitleId": "AB12", "DeveloperSecretKey": "éééééééééééé", "CatalogName": "Main"}"#,
        )
        .await
        .unwrap();

        assert_eq!(settings.masked_secret(), "ééé...ééé");
    }

    #[tokio::test]
    async fn test_short_secret_fully_masked() {
        // Validation only requires non-empty, so a short key still loads
        let settings = write_and_load(
            r#"{"TitleId": "AB12", "DeveloperSecretKey": "short", "CatalogName": "Main"}"#,
        )
        .await
        .unwrap();

        assert_eq!(settings.masked_secret(), "****");
    }
}

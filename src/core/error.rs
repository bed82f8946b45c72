//! Error handling for content publishing
//!
//! Distinguishes the three failure classes the upload run cares about:
//! local file/parse problems, structured errors returned by the backend,
//! and transport failures that end the run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error name the backend returns when a statistic definition already exists.
pub const STATISTIC_NAME_CONFLICT: &str = "StatisticNameConflict";

/// Structured error returned by the backend admin API.
///
/// `details` maps a request field name to the list of issues the backend
/// reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub code: String,
    pub message: String,
    pub details: BTreeMap<String, Vec<String>>,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// True when this error means the statistic definition already exists
    /// and an update call should be issued instead.
    pub fn is_statistic_name_conflict(&self) -> bool {
        self.code == STATISTIC_NAME_CONFLICT
    }
}

impl fmt::Display for RemoteError {
    /// Renders as `[code] -- message: field: issue, issue, ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] -- {}", self.code, self.message)?;
        for (field, issues) in &self.details {
            write!(f, ": {}: {}", field, issues.join(", "))?;
        }
        Ok(())
    }
}

/// Result of a single remote call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend accepted the request and returned a structured error.
    /// The current item is recorded as failed and the loop continues.
    #[error("{0}")]
    Remote(RemoteError),

    /// Network or protocol failure. Fatal for the remainder of the run.
    #[error("通信エラーが発生しました: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Main error type for the publishing pipeline
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("ファイルを読み込めませんでした: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルの解析に失敗しました: {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("タイトル設定が不正です: {reason}")]
    InvalidSettings { reason: String },

    #[error("認証トークンを取得できませんでした")]
    AuthFailed,

    #[error("通信エラーが発生しました: {0}")]
    Transport(String),

    #[error("ログファイルを書き込めませんでした")]
    LogWrite(#[from] std::io::Error),
}

impl PublishError {
    /// Stable error code, used as the prefix of CLI failure lines
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileRead { .. } => "FILE_READ",
            Self::FileParse { .. } => "FILE_PARSE",
            Self::InvalidSettings { .. } => "INVALID_SETTINGS",
            Self::AuthFailed => "AUTH_FAILED",
            Self::Transport(_) => "TRANSPORT",
            Self::LogWrite(_) => "LOG_WRITE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_without_details() {
        let error = RemoteError::new("InvalidParams", "The request was malformed");
        assert_eq!(
            error.to_string(),
            "[InvalidParams] -- The request was malformed"
        );
    }

    #[test]
    fn test_remote_error_display_with_field_details() {
        let mut error = RemoteError::new("InvalidParams", "Invalid input");
        error.details.insert(
            "CurrencyCode".to_string(),
            vec![
                "must be two characters".to_string(),
                "must be uppercase".to_string(),
            ],
        );

        assert_eq!(
            error.to_string(),
            "[InvalidParams] -- Invalid input: CurrencyCode: must be two characters, must be uppercase"
        );
    }

    #[test]
    fn test_statistic_name_conflict_detection() {
        let conflict = RemoteError::new(STATISTIC_NAME_CONFLICT, "already exists");
        assert!(conflict.is_statistic_name_conflict());

        let other = RemoteError::new("InvalidParams", "bad request");
        assert!(!other.is_statistic_name_conflict());
    }

    #[test]
    fn test_error_codes_name_the_variant() {
        let transport = PublishError::Transport("connection refused".to_string());
        assert_eq!(transport.code(), "TRANSPORT");

        let read = PublishError::FileRead {
            path: PathBuf::from("Catalog.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(read.code(), "FILE_READ");

        assert_eq!(PublishError::AuthFailed.code(), "AUTH_FAILED");
    }
}

use thiserror::Error;

use crate::storage::credentials::ENV_KEY_NAME;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("CredentialError: {0}")]
    Credential(#[from] CredentialError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ProtocolError: {0}")]
    Protocol(#[from] ProtocolError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Failed to format output: {0}")]
    Output(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("예상치 못한 응답 형식(최초 500자): {snippet}")]
    UnexpectedFormat { endpoint: String, snippet: String },
    /// Error envelope returned by the dictionary API, already translated.
    #[error("{0}")]
    Remote(String),
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("API 키가 필요합니다. 환경변수 STDICT_API_KEY 또는 설정에 키를 등록해 주세요.")]
    Missing,
    #[error("Elicitation failed: {0}")]
    Elicitation(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to read MCP message: {0}")]
    Read(std::io::Error),
    #[error("Failed to write MCP message: {0}")]
    Write(std::io::Error),
    #[error("Connection closed while waiting for {0}")]
    Closed(String),
}

impl AppError {
    /// Message surfaced to the host, without the layer prefix.
    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(ApiError::Remote(message)) => message.clone(),
            AppError::Api(e) => e.to_string(),
            AppError::Credential(e) => e.to_string(),
            AppError::Cli(CliError::InvalidArguments(message)) => message.clone(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Credential(CredentialError::Missing) => Some(format!(
                "Set {} or run 'stdict-mcp key set' to store a key",
                ENV_KEY_NAME
            )),
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet connection and try again".to_string())
            }
            AppError::Api(ApiError::Remote(message)) if message.starts_with("[020]") => {
                Some("'stdict-mcp key status' shows which key is in use".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_is_verbatim() {
        let app_err = AppError::Api(ApiError::Remote(
            "[020] 등록되지 않은 키입니다. - x".to_string(),
        ));
        assert_eq!(app_err.display_friendly(), "[020] 등록되지 않은 키입니다. - x");
        assert_eq!(
            format!("{}", app_err),
            "ApiError: [020] 등록되지 않은 키입니다. - x"
        );
    }

    #[test]
    fn test_unexpected_format_display() {
        let api_err = ApiError::UnexpectedFormat {
            endpoint: "/view.do".to_string(),
            snippet: "<html>".to_string(),
        };
        assert_eq!(
            format!("{}", api_err),
            "예상치 못한 응답 형식(최초 500자): <html>"
        );
    }

    #[test]
    fn test_api_error_fields() {
        let api_err = ApiError::Http {
            status: 500,
            endpoint: "/search.do".to_string(),
            message: "boom".to_string(),
        };
        assert!(matches!(api_err, ApiError::Http { .. }));
        if let ApiError::Http {
            status,
            endpoint,
            message,
        } = api_err
        {
            assert_eq!(status, 500);
            assert_eq!(endpoint, "/search.do");
            assert_eq!(message, "boom");
        }

        let api_err = ApiError::Timeout {
            timeout_secs: 15,
            endpoint: "/view.do".to_string(),
        };
        assert_eq!(format!("{}", api_err), "Request timed out after 15s");
    }

    #[test]
    fn test_missing_credential_message_and_hint() {
        let app_err = AppError::Credential(CredentialError::Missing);
        assert!(app_err.display_friendly().contains("STDICT_API_KEY"));
        let hint = app_err.troubleshooting_hint();
        assert!(hint.is_some_and(|h| h.contains("key set")));
    }

    #[test]
    fn test_storage_error_display() {
        let storage_err = StorageError::ConfigParseError {
            message: "expected value".to_string(),
        };
        assert_eq!(
            format!("{}", storage_err),
            "Configuration parse error: expected value"
        );
        let app_err = AppError::Storage(StorageError::ConfigDirNotFound);
        assert_eq!(
            app_err.display_friendly(),
            "StorageError: Configuration directory not found"
        );
        assert!(app_err.troubleshooting_hint().is_none());
    }

    #[test]
    fn test_cli_error_display() {
        let app_err = AppError::Cli(CliError::InvalidArguments("bad advanced".to_string()));
        assert_eq!(format!("{}", app_err), "CliError: Invalid arguments: bad advanced");
        assert_eq!(app_err.display_friendly(), "bad advanced");
    }
}

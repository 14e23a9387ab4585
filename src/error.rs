use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiagnosticsError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DiagnosticsError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DiagnosticsError::InvalidInput { .. }
                | DiagnosticsError::UnknownChannel(_)
                | DiagnosticsError::UnknownStrategy(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DiagnosticsError>;

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("link format error: {0}")]
    LinkFormat(String),
    #[error("pagination error: {0}")]
    Pagination(String),
    #[error("api error (retcode {retcode}): {message}")]
    Api { retcode: i64, message: String },
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Network(err.to_string())
    }
}

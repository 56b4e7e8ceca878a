use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("content error: {0}")]
    Content(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup error: {0}")]
    Logging(String),
}

pub type TfResult<T> = Result<T, TypeForgeError>;

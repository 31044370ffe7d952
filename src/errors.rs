use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Server(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session store error: {0}")]
    SessionIo(#[from] std::io::Error),

    #[error("Session data error: {0}")]
    SessionData(#[from] serde_json::Error),
}

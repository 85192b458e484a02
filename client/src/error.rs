use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    #[error("Cannot modify status of delivered orders")]
    DeliveredLocked,
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Status HTTP della risposta, se l'errore arriva dal backend
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ClientError::Http(err) => err.status(),
            ClientError::DeliveredLocked => None,
        }
    }
}

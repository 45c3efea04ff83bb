use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("row {0} is not loaded")]
    UnknownRow(String),
    #[error("save failed: {0}")]
    Save(#[from] ClientError),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("template error: {0}")]
    Template(String),
}

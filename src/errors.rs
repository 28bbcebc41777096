use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failures talking to the ledger store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid store path: {0:?}")]
    InvalidPath(String),

    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed store payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected value at {path}: {value}")]
    UnexpectedValue { path: String, value: serde_json::Value },
}

#[derive(Error, Debug, PartialEq)]
pub enum EditorError {
    #[error("'{0}' is not an amount key")]
    InvalidDigit(char),

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("unknown category {0}")]
    UnknownCategory(usize),

    #[error("'{0}' cannot be used as a product key")]
    InvalidProduct(String),
}

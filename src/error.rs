use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::dto::{ErrorDTO, MessageDTO};

/// Failures while turning uploaded bytes into a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("No columns to parse from file")]
    Empty,

    #[error("Error tokenizing data: {0}")]
    Malformed(#[from] csv::Error),

    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by an aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Anything that can go wrong between receiving the file and producing predictions.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("File exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error(transparent)]
    Processing(#[from] ProcessError),

    #[error("Upload processing was interrupted")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFilePart | ApiError::NoSelectedFile | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Processing(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            // Missing-file problems are reported as plain messages, everything else as errors.
            ApiError::NoFilePart | ApiError::NoSelectedFile => builder.json(MessageDTO {
                message: self.to_string(),
            }),
            _ => builder.json(ErrorDTO {
                error: self.to_string(),
            }),
        }
    }
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sqlx::error::Error as SQL_ERROR;
use std::string::FromUtf8Error as FROM_UTF8_ERROR;
use std::{
    env::VarError,
    io::Error as IO_ERROR,
    num::{ParseFloatError, ParseIntError},
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    FLOAT(#[from] ParseFloatError),

    #[error("{0}")]
    SQL(#[from] SQL_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Missing required parameters: {0}")]
    MissingParams(String),

    #[error("Invalid option: {option}")]
    InvalidOption { option: String },

    #[error("Decode datetime: {0}")]
    DecodeDateTimeError(String),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("FromUtf8Error error: {0}")]
    FromUtf8Error(#[from] FROM_UTF8_ERROR),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request - client sent invalid input
            Error::MissingParams(_)
            | Error::InvalidOption { .. }
            | Error::DecodeDateTimeError(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error - everything else
            Error::Io(_)
            | Error::INT(_)
            | Error::FLOAT(_)
            | Error::SQL(_)
            | Error::VAR(_)
            | Error::TokioJoinError(_)
            | Error::ConfigurationError(_)
            | Error::ServerError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::FromUtf8Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let reason = status.canonical_reason().unwrap_or("Unknown");

        // internal detail stays in the log
        let body = if status.is_server_error() {
            error!("Request failed: {}", self);
            serde_json::json!({
                "error": reason,
                "status": status.as_u16(),
            })
        } else {
            serde_json::json!({
                "error": reason,
                "message": self.to_string(),
                "status": status.as_u16(),
            })
        };

        HttpResponse::build(status).json(body)
    }
}

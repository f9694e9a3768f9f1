// errors.rs
use std::fmt;

/// Errors originating from the server logic (routing, validation, missing
/// resources) or downstream layers (DB, filesystem, export encoders).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Constraint(String),
    DbError(String),
    IoError(String),
    XlsxError(String),
    CsvError(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Constraint(msg) => write!(f, "Constraint Violation: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::IoError(msg) => write!(f, "File Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::CsvError(msg) => write!(f, "CSV Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            // Foreign-key and uniqueness violations get their own variant so
            // the UI can phrase them as a form problem, not a server fault.
            rusqlite::Error::SqliteFailure(inner, _)
                if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ServerError::Constraint(e.to_string())
            }
            _ => ServerError::DbError(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> Self {
        ServerError::IoError(e.to_string())
    }
}

impl From<csv::Error> for ServerError {
    fn from(e: csv::Error) -> Self {
        ServerError::CsvError(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ServerError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ServerError::XlsxError(e.to_string())
    }
}

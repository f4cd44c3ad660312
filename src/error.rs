//! Defines the app level error type and its conversion to JSON error responses and error pages.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;
use serde_json::json;

use crate::html::error_view;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or query string could not be parsed.
    ///
    /// The string holds the parser's explanation, which is logged but not
    /// sent to the client.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The client asked for an export format other than CSV.
    #[error("unsupported export format \"{0}\"")]
    UnsupportedFormat(String),

    /// A card limit was set below zero.
    #[error("limits cannot be negative")]
    NegativeLimit,

    /// The daily card limit was set above the monthly card limit.
    #[error("daily limit cannot exceed monthly limit")]
    DailyLimitAboveMonthly,

    /// A required registration or profile field was empty.
    #[error("the field \"{0}\" cannot be empty")]
    EmptyField(&'static str),

    /// Somebody already registered with this e-mail address.
    #[error("the e-mail address \"{0}\" is already registered")]
    DuplicateEmail(String),

    /// The e-mail and password do not match a registered user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request has no session cookie, or the cookie is invalid or expired.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The session cookie could not be created.
    #[error("could not create the session cookie: {0}")]
    CookieError(String),

    /// The transactions could not be written as CSV.
    #[error("could not export transactions as CSV: {0}")]
    CsvExport(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A lock around shared state was poisoned by a panicking thread.
    #[error("could not acquire the lock for {0}")]
    LockError(&'static str),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExport(value.to_string())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_)
            | Error::UnsupportedFormat(_)
            | Error::NegativeLimit
            | Error::DailyLimitAboveMonthly
            | Error::EmptyField(_)
            | Error::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::HashingError(_)
            | Error::CookieError(_)
            | Error::CsvExport(_)
            | Error::InvalidTimezoneError(_)
            | Error::LockError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the client.
    ///
    /// Internal errors get a generic message so that server details do not leak.
    fn client_message(&self) -> String {
        match self {
            Error::InvalidRequest(_) => "Invalid request".to_owned(),
            Error::UnsupportedFormat(_) => "Unsupported format".to_owned(),
            Error::NegativeLimit => "Limits cannot be negative".to_owned(),
            Error::DailyLimitAboveMonthly => "Daily limit cannot exceed monthly limit".to_owned(),
            Error::EmptyField(field) => format!("The {field} field cannot be empty"),
            Error::DuplicateEmail(_) => "An account with this e-mail already exists".to_owned(),
            Error::InvalidCredentials => "Invalid credentials".to_owned(),
            Error::NotAuthenticated => "Not authenticated".to_owned(),
            Error::NotFound => "Not found".to_owned(),
            _ => "Internal server error".to_owned(),
        }
    }

    /// Render the error as a full HTML page instead of JSON.
    pub(crate) fn into_page_response(self) -> Response {
        let status = self.status_code();
        log_error(&self, status);

        let page: Markup = match status {
            StatusCode::NOT_FOUND => error_view(
                "Not Found",
                "404",
                "Page not found.",
                "Check the address, or head back to the transactions page.",
            ),
            StatusCode::BAD_REQUEST => error_view(
                "Bad Request",
                "400",
                &self.client_message(),
                "Check your input and try again.",
            ),
            _ => error_view(
                "Internal Server Error",
                "500",
                "Sorry, something went wrong.",
                "Try again later or check the server logs.",
            ),
        };

        (status, page).into_response()
    }
}

fn log_error(error: &Error, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!("An unexpected error occurred: {error}");
    } else {
        tracing::debug!("Rejecting request with {status}: {error}");
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        log_error(&self, status);

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

//! Serves the transactions as a downloadable file.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{Error, timezone::local_today};

use super::{TransactionState, core::iso_date::DATE_FORMAT, export_csv};

/// The query string of an export request.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// The file format. Only "csv" is supported, and is the default.
    pub format: Option<String>,
}

/// A route handler that downloads every transaction as a CSV file.
///
/// The file is named after today's date in the server's timezone, e.g.
/// "transactions-2024-12-19.csv".
///
/// # Errors
///
/// Returns an [Error::UnsupportedFormat] if the requested format is not "csv".
pub async fn export_transactions(
    State(state): State<TransactionState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let format = query.format.as_deref().unwrap_or("csv");
    if format != "csv" {
        return Err(Error::UnsupportedFormat(format.to_owned()));
    }

    let transactions = state.snapshot()?;
    let csv = export_csv(&transactions)?;

    let today = local_today(&state.local_timezone)?
        .format(DATE_FORMAT)
        .map_err(|error| Error::CsvExport(error.to_string()))?;
    let content_disposition = format!("attachment; filename=\"transactions-{today}.csv\"");

    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_owned()),
            (CONTENT_DISPOSITION, content_disposition),
        ],
        csv,
    )
        .into_response())
}

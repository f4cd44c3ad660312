//! Creates transactions from the "add transaction" dialog.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{Error, timezone::local_today};

use super::{NewTransaction, Transaction, TransactionState};

/// A route handler for creating a new transaction dated today.
///
/// The amount's sign is set from the transaction type, so clients may send
/// expenses as positive numbers.
///
/// # Errors
///
/// Returns an [Error::InvalidRequest] if the body is not a valid transaction.
pub async fn create_transaction(
    State(state): State<TransactionState>,
    body: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(new_transaction) =
        body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let today = local_today(&state.local_timezone)?;

    let transaction = state
        .store
        .lock()
        .map_err(|_| Error::LockError("transaction store"))?
        .append(new_transaction, today);

    tracing::info!(
        "Created transaction {} for {}",
        transaction.id,
        transaction.amount
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}

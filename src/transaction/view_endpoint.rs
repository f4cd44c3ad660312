//! Serves the filtered, sorted and totalled transaction list.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::Error;

use super::{Criteria, TransactionState, TransactionView, apply_criteria};

/// A route handler that applies the query string's [Criteria] to the store.
///
/// # Errors
///
/// Returns an [Error::InvalidRequest] if a query parameter has an unknown value.
pub async fn get_transaction_view(
    State(state): State<TransactionState>,
    query: Result<Query<Criteria>, QueryRejection>,
) -> Result<Json<TransactionView>, Error> {
    let Query(criteria) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let transactions = state.snapshot()?;

    Ok(Json(apply_criteria(&transactions, &criteria)))
}

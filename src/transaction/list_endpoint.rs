//! Lists every transaction.

use axum::{Json, extract::State};

use crate::Error;

use super::{Transaction, TransactionState};

/// A route handler that returns the whole store, newest first.
pub async fn get_transactions(
    State(state): State<TransactionState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    state.snapshot().map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;

    use crate::{
        endpoints,
        transaction::{InMemoryTransactionStore, Transaction, TransactionState},
    };

    use super::get_transactions;

    #[tokio::test]
    async fn returns_sample_data_in_store_order() {
        let state = TransactionState {
            store: Arc::new(Mutex::new(InMemoryTransactionStore::with_sample_data())),
            local_timezone: "Etc/UTC".to_owned(),
        };
        let app = Router::new()
            .route(endpoints::TRANSACTIONS_API, get(get_transactions))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let transactions: Vec<Transaction> = response.json();
        let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }
}

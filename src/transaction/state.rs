use axum::extract::FromRef;

use crate::{AppState, Error};

use super::{Transaction, store::SharedTransactionStore};

/// The state needed by the transaction handlers.
#[derive(Clone)]
pub struct TransactionState {
    /// Where transactions are kept.
    pub store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl TransactionState {
    /// A copy of every transaction in store order.
    ///
    /// # Errors
    /// Returns an [Error::LockError] if the store's lock was poisoned.
    pub fn snapshot(&self) -> Result<Vec<Transaction>, Error> {
        let store = self
            .store
            .lock()
            .map_err(|_| Error::LockError("transaction store"))?;

        Ok(store.list())
    }
}

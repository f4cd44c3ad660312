//! Transactions: the record type, the store that holds them, the engine that
//! filters, sorts and totals them, and the route handlers that serve them as
//! JSON, CSV and HTML.

mod core;
mod create_endpoint;
mod export;
mod export_endpoint;
mod list_endpoint;
mod state;
mod store;
mod transactions_page;
mod view;
mod view_endpoint;

pub use self::core::{
    NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType,
};
pub use create_endpoint::create_transaction;
pub use export::{CSV_HEADER, export_csv};
pub use export_endpoint::{ExportQuery, export_transactions};
pub use list_endpoint::get_transactions;
pub use state::TransactionState;
pub use store::{
    InMemoryTransactionStore, SharedTransactionStore, TransactionStore, sample_transactions,
};
pub use transactions_page::get_transactions_page;
pub use view::{
    Criteria, SortDirection, SortKey, StatusFilter, Totals, TransactionView, TypeFilter,
    apply_criteria,
};
pub use view_endpoint::get_transaction_view;

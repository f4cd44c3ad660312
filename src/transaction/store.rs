//! Defines the transaction store trait and an in-memory implementation of it.

use std::sync::{Arc, Mutex};

use time::{Date, macros::date};

use super::core::{
    NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType,
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Retrieve every transaction in store order, newest first.
    fn list(&self) -> Vec<Transaction>;

    /// Store a new transaction dated `date` and return the stored record.
    ///
    /// Implementers must normalize the sign of the amount, assign a fresh ID,
    /// mark the transaction as completed and put it at the front of the list.
    fn append(&mut self, new_transaction: NewTransaction, date: Date) -> Transaction;
}

/// A transaction store that can be shared between request handlers.
pub type SharedTransactionStore = Arc<Mutex<dyn TransactionStore + Send>>;

/// Keeps transactions in a `Vec` that lives as long as the process.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryTransactionStore {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store holding `transactions` in the given order.
    ///
    /// New IDs continue after the largest numeric ID in `transactions` so
    /// that an ID is never handed out twice.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let largest_numeric_id = transactions
            .iter()
            .filter_map(|transaction| transaction.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next_id = largest_numeric_id.max(transactions.len() as u64) + 1;

        Self {
            transactions,
            next_id,
        }
    }

    /// Create a store seeded with [sample_transactions].
    pub fn with_sample_data() -> Self {
        Self::from_transactions(sample_transactions())
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn list(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn append(&mut self, new_transaction: NewTransaction, date: Date) -> Transaction {
        let id = TransactionId::new(self.next_id.to_string());
        self.next_id += 1;

        let transaction = new_transaction.finalize(id, date);
        self.transactions.insert(0, transaction.clone());

        transaction
    }
}

/// The eight transactions the dashboard starts with, newest first.
pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionStatus::{Completed, Failed, Pending};
    use TransactionType::{Expense, Income};

    [
        ("1", date!(2024 - 12 - 19), "Monthly Subscription Payment", 2500.0, Income, "Subscriptions", Completed),
        ("2", date!(2024 - 12 - 18), "Office Supplies", -450.0, Expense, "Office", Completed),
        ("3", date!(2024 - 12 - 17), "Client Project Payment", 8500.0, Income, "Services", Completed),
        ("4", date!(2024 - 12 - 16), "Software License", -299.0, Expense, "Software", Pending),
        ("5", date!(2024 - 12 - 15), "Marketing Campaign", -1200.0, Expense, "Marketing", Completed),
        ("6", date!(2024 - 12 - 14), "Consulting Services", 3500.0, Income, "Services", Completed),
        ("7", date!(2024 - 12 - 13), "Equipment Purchase", -2800.0, Expense, "Equipment", Failed),
        ("8", date!(2024 - 12 - 12), "Product Sales", 4200.0, Income, "Products", Completed),
    ]
    .into_iter()
    .map(
        |(id, date, description, amount, kind, category, status)| Transaction {
            id: TransactionId::new(id),
            date,
            description: description.to_owned(),
            amount,
            kind,
            category: category.to_owned(),
            status,
        },
    )
    .collect()
}

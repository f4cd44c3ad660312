//! Defines the transaction record and the constructor that keeps its sign consistent with its type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

/// An opaque, unique identifier for a [Transaction].
///
/// IDs are assigned by the store when a transaction is created and are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in. Income amounts are positive.
    Income,
    /// Money going out. Expense amounts are negative.
    Expense,
}

impl TransactionType {
    /// The lowercase name used on the wire and in CSV exports.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// How far along a transaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The money has moved.
    Completed,
    /// Waiting on the bank or payment provider.
    Pending,
    /// The payment was declined or reversed.
    Failed,
}

impl TransactionStatus {
    /// The lowercase name used on the wire and in CSV exports.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, describe it with a [NewTransaction] and
/// hand it to a [crate::transaction::TransactionStore].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent (negative) or earned (positive).
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A free-text label such as "Office" or "Services".
    pub category: String,
    /// Whether the transaction went through.
    pub status: TransactionStatus,
}

/// The caller-supplied fields of a transaction that has not been stored yet.
///
/// The sign of `amount` is not trusted: [NewTransaction::normalized_amount]
/// derives it from `kind` when the transaction is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The size of the transaction. Only the magnitude is used.
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A free-text label such as "Office" or "Services".
    pub category: String,
}

impl NewTransaction {
    /// Describe a new transaction.
    pub fn new(description: &str, amount: f64, kind: TransactionType, category: &str) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            kind,
            category: category.to_owned(),
        }
    }

    /// The amount with its sign set by the transaction type: expenses are
    /// negative and income is positive, whatever sign the caller used.
    pub fn normalized_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount.abs(),
            TransactionType::Expense => -self.amount.abs(),
        }
    }

    /// Turn this into a completed [Transaction] with the given `id` and `date`.
    pub fn finalize(self, id: TransactionId, date: Date) -> Transaction {
        Transaction {
            id,
            date,
            amount: self.normalized_amount(),
            description: self.description,
            kind: self.kind,
            category: self.category,
            status: TransactionStatus::Completed,
        }
    }
}

pub(crate) mod iso_date {
    //! Serializes a [time::Date] as an ISO 8601 calendar date, e.g. "2024-12-19".
    //!
    //! The default serde implementation for [time::Date] writes a
    //! `(year, ordinal)` tuple, which is not what clients expect.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    /// Date format for transaction dates, e.g. "2024-12-19".
    pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType};

    #[test]
    fn expense_amount_is_made_negative() {
        let new_transaction =
            NewTransaction::new("Office Supplies", 450.0, TransactionType::Expense, "Office");

        assert_eq!(new_transaction.normalized_amount(), -450.0);
    }

    #[test]
    fn income_amount_is_made_positive() {
        let new_transaction =
            NewTransaction::new("Refund", -120.5, TransactionType::Income, "Services");

        assert_eq!(new_transaction.normalized_amount(), 120.5);
    }

    #[test]
    fn negative_expense_amount_stays_negative() {
        let new_transaction =
            NewTransaction::new("Rent", -1200.0, TransactionType::Expense, "Office");

        assert_eq!(new_transaction.normalized_amount(), -1200.0);
    }

    #[test]
    fn finalize_sets_completed_status() {
        let transaction = NewTransaction::new("Coffee", 4.5, TransactionType::Expense, "Food")
            .finalize(TransactionId::new("9"), date!(2024 - 12 - 20));

        assert_eq!(
            transaction,
            Transaction {
                id: TransactionId::new("9"),
                date: date!(2024 - 12 - 20),
                description: "Coffee".to_owned(),
                amount: -4.5,
                kind: TransactionType::Expense,
                category: "Food".to_owned(),
                status: TransactionStatus::Completed,
            }
        );
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let transaction = NewTransaction::new("Product Sales", 4200.0, TransactionType::Income, "Products")
            .finalize(TransactionId::new("8"), date!(2024 - 12 - 12));

        let json = serde_json::to_string(&transaction).unwrap();

        assert_eq!(
            json,
            r#"{"id":"8","date":"2024-12-12","description":"Product Sales","amount":4200.0,"type":"income","category":"Products","status":"completed"}"#
        );
    }

    #[test]
    fn deserialize_rejects_malformed_date() {
        let json = r#"{"id":"1","date":"12/19/2024","description":"x","amount":1.0,"type":"income","category":"c","status":"completed"}"#;

        let result = serde_json::from_str::<Transaction>(json);

        assert!(result.is_err());
    }

    #[test]
    fn new_transaction_reads_type_key() {
        let json = r#"{"description":"Lunch","amount":20,"type":"expense","category":"Food"}"#;

        let new_transaction: NewTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(new_transaction.kind, TransactionType::Expense);
        assert_eq!(new_transaction.amount, 20.0);
    }
}

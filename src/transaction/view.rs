//! The transaction view engine: filters, sorts and totals a list of transactions.
//!
//! [apply_criteria] is a pure function of its inputs. It never mutates the
//! source list, so it can be re-run on every change to either the list or
//! the [Criteria].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::core::{Transaction, TransactionStatus, TransactionType};

/// Which transaction types to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Keep income and expenses.
    #[default]
    All,
    /// Keep income only.
    Income,
    /// Keep expenses only.
    Expense,
}

impl TypeFilter {
    fn matches(self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

/// Which transaction statuses to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Keep every status.
    #[default]
    All,
    /// Keep completed transactions only.
    Completed,
    /// Keep pending transactions only.
    Pending,
    /// Keep failed transactions only.
    Failed,
}

impl StatusFilter {
    fn matches(self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status == TransactionStatus::Completed,
            StatusFilter::Pending => status == TransactionStatus::Pending,
            StatusFilter::Failed => status == TransactionStatus::Failed,
        }
    }
}

/// The field to order transactions by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Order by calendar date.
    #[default]
    Date,
    /// Order by the size of the amount, ignoring its sign.
    Amount,
    /// Order by description, lexicographically.
    Description,
}

/// The direction to order transactions in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The user-selected combination of search text, filters and sort order.
///
/// Every field has a default, so an empty query string deserializes to
/// "everything, newest first".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Case-insensitive text to look for in the description or category.
    pub search: String,
    /// Keep only this transaction type.
    #[serde(rename = "type")]
    pub kind: TypeFilter,
    /// Keep only this status.
    pub status: StatusFilter,
    /// The field to sort by.
    pub sort: SortKey,
    /// The direction to sort in.
    pub order: SortDirection,
}

/// Income, expense and net totals over completed transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of completed income.
    pub total_income: f64,
    /// Sum of the magnitudes of completed expenses.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub net_balance: f64,
}

impl Totals {
    /// Total the completed transactions in `transactions`.
    ///
    /// Pending and failed transactions are ignored.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (total_income, total_expenses) = transactions
            .iter()
            .filter(|transaction| transaction.status == TransactionStatus::Completed)
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                match transaction.kind {
                    TransactionType::Income => (income + transaction.amount, expenses),
                    TransactionType::Expense => (income, expenses + transaction.amount.abs()),
                }
            });

        Self {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }
}

/// The display-ready result of applying [Criteria] to a list of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// The transactions that passed every filter, in sorted order.
    pub transactions: Vec<Transaction>,
    /// Totals over `transactions`.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Filter, sort and total `transactions` according to `criteria`.
///
/// Totals are computed over the filtered set, so changing a filter changes
/// the totals. Sorting is stable: transactions with equal sort keys keep
/// their relative order from `transactions`, in either direction.
pub fn apply_criteria(transactions: &[Transaction], criteria: &Criteria) -> TransactionView {
    let search_term = criteria.search.to_lowercase();

    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            matches_search(transaction, &search_term)
                && criteria.kind.matches(transaction.kind)
                && criteria.status.matches(transaction.status)
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = compare_by(criteria.sort, a, b);

        match criteria.order {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let totals = Totals::from_transactions(&filtered);

    TransactionView {
        transactions: filtered,
        totals,
    }
}

/// `search_term` must already be lowercase.
fn matches_search(transaction: &Transaction, search_term: &str) -> bool {
    search_term.is_empty()
        || transaction.description.to_lowercase().contains(search_term)
        || transaction.category.to_lowercase().contains(search_term)
}

fn compare_by(key: SortKey, a: &Transaction, b: &Transaction) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.abs().total_cmp(&b.amount.abs()),
        SortKey::Description => a.description.cmp(&b.description),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{
        Transaction, TransactionId, TransactionStatus, TransactionType, sample_transactions,
    };

    use super::{
        Criteria, SortDirection, SortKey, StatusFilter, Totals, TypeFilter, apply_criteria,
    };

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    fn transaction(id: &str, amount: f64, description: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: date!(2024 - 12 - 01),
            description: description.to_owned(),
            amount,
            kind: if amount < 0.0 {
                TransactionType::Expense
            } else {
                TransactionType::Income
            },
            category: "General".to_owned(),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn completed_income_scenario() {
        let criteria = Criteria {
            kind: TypeFilter::Income,
            status: StatusFilter::Completed,
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        assert_eq!(ids(&got.transactions), ["1", "3", "6", "8"]);
        let amounts: Vec<f64> = got.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, [2500.0, 8500.0, 3500.0, 4200.0]);
        assert_eq!(
            got.totals,
            Totals {
                total_income: 18700.0,
                total_expenses: 0.0,
                net_balance: 18700.0,
            }
        );
    }

    #[test]
    fn default_criteria_keeps_everything_newest_first() {
        let transactions = sample_transactions();

        let got = apply_criteria(&transactions, &Criteria::default());

        assert_eq!(got.transactions, transactions);
    }

    #[test]
    fn totals_over_whole_fixture_skip_pending_and_failed() {
        let got = apply_criteria(&sample_transactions(), &Criteria::default());

        assert_eq!(got.totals.total_income, 18700.0);
        // 450 + 1200; the pending licence and failed equipment purchase are excluded.
        assert_eq!(got.totals.total_expenses, 1650.0);
        assert_eq!(got.totals.net_balance, 17050.0);
    }

    #[test]
    fn totals_follow_the_filter() {
        let criteria = Criteria {
            search: "office".to_owned(),
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        assert_eq!(ids(&got.transactions), ["2"]);
        assert_eq!(got.totals.total_income, 0.0);
        assert_eq!(got.totals.total_expenses, 450.0);
        assert_eq!(got.totals.net_balance, -450.0);
    }

    #[test]
    fn search_is_case_insensitive_over_description_and_category() {
        let criteria = Criteria {
            search: "SERVICES".to_owned(),
            sort: SortKey::Date,
            order: SortDirection::Asc,
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        // "Consulting Services" matches on description, "Client Project
        // Payment" only on its category.
        assert_eq!(ids(&got.transactions), ["6", "3"]);
    }

    #[test]
    fn filter_keeps_exactly_matching_transactions() {
        let transactions = sample_transactions();

        for kind in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
            for status in [
                StatusFilter::All,
                StatusFilter::Completed,
                StatusFilter::Pending,
                StatusFilter::Failed,
            ] {
                for search in ["", "pay", "s", "zzz"] {
                    let criteria = Criteria {
                        search: search.to_owned(),
                        kind,
                        status,
                        ..Default::default()
                    };

                    let got = apply_criteria(&transactions, &criteria);

                    for transaction in &transactions {
                        let should_keep = (transaction.description.to_lowercase().contains(search)
                            || transaction.category.to_lowercase().contains(search))
                            && kind.matches(transaction.kind)
                            && status.matches(transaction.status);
                        let kept = got.transactions.contains(transaction);

                        assert_eq!(
                            kept, should_keep,
                            "transaction {} with criteria {criteria:?}",
                            transaction.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn totals_are_consistent_for_every_filter() {
        let transactions = sample_transactions();

        for kind in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
            for status in [
                StatusFilter::All,
                StatusFilter::Completed,
                StatusFilter::Pending,
                StatusFilter::Failed,
            ] {
                let criteria = Criteria {
                    kind,
                    status,
                    ..Default::default()
                };

                let totals = apply_criteria(&transactions, &criteria).totals;

                assert!(totals.total_income >= 0.0);
                assert!(totals.total_expenses >= 0.0);
                assert_eq!(
                    totals.net_balance,
                    totals.total_income - totals.total_expenses
                );
            }
        }
    }

    #[test]
    fn sort_by_amount_ignores_sign() {
        let transactions = vec![
            transaction("a", 250.0, "a"),
            transaction("b", -100.0, "b"),
            transaction("c", 100.0, "c"),
            transaction("d", -300.0, "d"),
        ];
        let criteria = Criteria {
            sort: SortKey::Amount,
            order: SortDirection::Asc,
            ..Default::default()
        };

        let got = apply_criteria(&transactions, &criteria);

        assert_eq!(ids(&got.transactions), ["b", "c", "a", "d"]);
    }

    #[test]
    fn sort_by_amount_descending_on_fixture() {
        let criteria = Criteria {
            sort: SortKey::Amount,
            order: SortDirection::Desc,
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        assert_eq!(ids(&got.transactions), ["3", "8", "6", "7", "1", "5", "2", "4"]);
    }

    #[test]
    fn sort_by_description() {
        let criteria = Criteria {
            sort: SortKey::Description,
            order: SortDirection::Asc,
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        assert_eq!(ids(&got.transactions), ["3", "6", "7", "5", "1", "2", "8", "4"]);
    }

    #[test]
    fn sort_by_date_ascending() {
        let criteria = Criteria {
            sort: SortKey::Date,
            order: SortDirection::Asc,
            ..Default::default()
        };

        let got = apply_criteria(&sample_transactions(), &criteria);

        assert_eq!(ids(&got.transactions), ["8", "7", "6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys_in_both_directions() {
        let transactions: Vec<Transaction> = (0..6)
            .map(|i| transaction(&i.to_string(), if i % 2 == 0 { 5.0 } else { -5.0 }, "same"))
            .collect();

        for sort in [SortKey::Date, SortKey::Amount, SortKey::Description] {
            for order in [SortDirection::Asc, SortDirection::Desc] {
                let criteria = Criteria {
                    sort,
                    order,
                    ..Default::default()
                };

                let got = apply_criteria(&transactions, &criteria);

                assert_eq!(
                    ids(&got.transactions),
                    ["0", "1", "2", "3", "4", "5"],
                    "sort {sort:?} {order:?}"
                );
            }
        }
    }

    #[test]
    fn applying_twice_gives_the_same_result() {
        let transactions = sample_transactions();
        let criteria = Criteria {
            search: "s".to_owned(),
            kind: TypeFilter::All,
            status: StatusFilter::Completed,
            sort: SortKey::Amount,
            order: SortDirection::Asc,
        };

        let first = apply_criteria(&transactions, &criteria);
        let second = apply_criteria(&transactions, &criteria);

        assert_eq!(first, second);
        assert_eq!(transactions, sample_transactions());
    }

    #[test]
    fn empty_input_gives_empty_output_and_zero_totals() {
        let got = apply_criteria(&[], &Criteria::default());

        assert!(got.transactions.is_empty());
        assert_eq!(got.totals, Totals::default());
    }

    #[test]
    fn criteria_deserializes_from_query_string() {
        let criteria: Criteria =
            serde_urlencoded::from_str("search=pay&type=income&status=pending&sort=amount&order=asc")
                .unwrap();

        assert_eq!(
            criteria,
            Criteria {
                search: "pay".to_owned(),
                kind: TypeFilter::Income,
                status: StatusFilter::Pending,
                sort: SortKey::Amount,
                order: SortDirection::Asc,
            }
        );
    }

    #[test]
    fn empty_query_string_gives_default_criteria() {
        let criteria: Criteria = serde_urlencoded::from_str("").unwrap();

        assert_eq!(criteria, Criteria::default());
    }

    #[test]
    fn view_serializes_totals_beside_transactions() {
        let view = apply_criteria(&[], &Criteria::default());

        let json = serde_json::to_string(&view).unwrap();

        assert_eq!(
            json,
            r#"{"transactions":[],"totalIncome":0.0,"totalExpenses":0.0,"netBalance":0.0}"#
        );
    }
}

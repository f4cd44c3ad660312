//! Defines the route handler for the page that displays transactions as a filterable,
//! sortable table with totals.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
};

use super::{
    Criteria, SortDirection, SortKey, StatusFilter, Totals, Transaction, TransactionState,
    TransactionStatus, TransactionType, TypeFilter, apply_criteria,
};

const EMPTY_MESSAGE: &str = "No transactions found matching your criteria.";

/// Render the transactions table for the criteria in the query string.
pub async fn get_transactions_page(
    State(state): State<TransactionState>,
    query: Result<Query<Criteria>, QueryRejection>,
) -> Response {
    let criteria = match query {
        Ok(Query(criteria)) => criteria,
        Err(rejection) => {
            return Error::InvalidRequest(rejection.body_text()).into_page_response();
        }
    };

    let transactions = match state.snapshot() {
        Ok(transactions) => transactions,
        Err(error) => return error.into_page_response(),
    };

    let view = apply_criteria(&transactions, &criteria);

    transactions_view(&view.transactions, view.totals, &criteria).into_response()
}

/// The URL of the transactions page with `criteria` in the query string.
fn criteria_url(criteria: &Criteria) -> String {
    match serde_urlencoded::to_string(criteria) {
        Ok(query) => format!("{}?{query}", endpoints::TRANSACTIONS_VIEW),
        Err(error) => {
            tracing::error!("Could not encode transaction criteria {criteria:?}: {error}");
            endpoints::TRANSACTIONS_VIEW.to_owned()
        }
    }
}

/// The link for a column header: sorts by `key`, flipping the direction if
/// the table is already sorted by `key`.
fn sort_link(criteria: &Criteria, key: SortKey) -> String {
    let order = if criteria.sort == key {
        criteria.order.toggled()
    } else {
        SortDirection::default()
    };

    criteria_url(&Criteria {
        sort: key,
        order,
        ..criteria.clone()
    })
}

fn sort_indicator(criteria: &Criteria, key: SortKey) -> &'static str {
    match (criteria.sort == key, criteria.order) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ▲",
        (true, SortDirection::Desc) => " ▼",
    }
}

fn amount_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Expense => "text-red-700 dark:text-red-300",
    }
}

fn signed_amount(transaction: &Transaction) -> String {
    match transaction.kind {
        TransactionType::Income => format!("+{}", format_currency(transaction.amount.abs())),
        TransactionType::Expense => format_currency(-transaction.amount.abs()),
    }
}

fn status_badge(status: TransactionStatus) -> Markup {
    let class = match status {
        TransactionStatus::Completed => {
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
        }
        TransactionStatus::Pending => {
            "bg-yellow-100 text-yellow-800 dark:bg-yellow-900 dark:text-yellow-300"
        }
        TransactionStatus::Failed => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
    };

    html! {
        span class={ "px-2 py-0.5 rounded text-xs font-medium " (class) } { (status.as_str()) }
    }
}

fn totals_view(totals: Totals) -> Markup {
    let net_class = if totals.net_balance >= 0.0 {
        "text-green-700 dark:text-green-300"
    } else {
        "text-red-700 dark:text-red-300"
    };

    html! {
        div class="grid grid-cols-1 md:grid-cols-3 gap-6 w-full"
        {
            div class="rounded border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800"
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Total Income" }
                p id="total-income" class="text-2xl font-bold text-green-700 dark:text-green-300"
                {
                    "+" (format_currency(totals.total_income))
                }
            }

            div class="rounded border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800"
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Total Expenses" }
                p id="total-expenses" class="text-2xl font-bold text-red-700 dark:text-red-300"
                {
                    (format_currency(-totals.total_expenses))
                }
            }

            div class="rounded border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800"
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Net Balance" }
                p id="net-balance" class={ "text-2xl font-bold " (net_class) }
                {
                    (format_currency(totals.net_balance))
                }
            }
        }
    }
}

fn filter_form(criteria: &Criteria) -> Markup {
    let type_options = [
        (TypeFilter::All, "all", "All Types"),
        (TypeFilter::Income, "income", "Income"),
        (TypeFilter::Expense, "expense", "Expense"),
    ];
    let status_options = [
        (StatusFilter::All, "all", "All Status"),
        (StatusFilter::Completed, "completed", "Completed"),
        (StatusFilter::Pending, "pending", "Pending"),
        (StatusFilter::Failed, "failed", "Failed"),
    ];
    let sort_options = [
        (SortKey::Date, "date", "Date"),
        (SortKey::Amount, "amount", "Amount"),
        (SortKey::Description, "description", "Description"),
    ];
    let order_options = [
        (SortDirection::Desc, "desc", "Descending"),
        (SortDirection::Asc, "asc", "Ascending"),
    ];

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-col md:flex-row gap-4 w-full items-end"
        {
            div class="flex-1"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }
                input
                    type="search"
                    id="search"
                    name="search"
                    value=(criteria.search)
                    placeholder="Search transactions..."
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, name, label) in type_options {
                        option value=(name) selected[criteria.kind == value] { (label) }
                    }
                }
            }

            div
            {
                label for="status" class=(FORM_LABEL_STYLE) { "Status" }
                select id="status" name="status" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, name, label) in status_options {
                        option value=(name) selected[criteria.status == value] { (label) }
                    }
                }
            }

            div
            {
                label for="sort" class=(FORM_LABEL_STYLE) { "Sort by" }
                select id="sort" name="sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, name, label) in sort_options {
                        option value=(name) selected[criteria.sort == value] { (label) }
                    }
                }
            }

            div
            {
                label for="order" class=(FORM_LABEL_STYLE) { "Order" }
                select id="order" name="order" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, name, label) in order_options {
                        option value=(name) selected[criteria.order == value] { (label) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={ "px-6 py-4 text-right " (amount_class(transaction.kind)) }
            {
                (signed_amount(transaction))
            }
            td class=(TABLE_CELL_STYLE) { (status_badge(transaction.status)) }
        }
    }
}

fn transactions_view(transactions: &[Transaction], totals: Totals, criteria: &Criteria) -> Markup {
    let export_url = format!("{}?format=csv", endpoints::TRANSACTIONS_EXPORT);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-col gap-6 w-full max-w-screen-xl"
            {
                div class="flex justify-between items-center"
                {
                    h1 class="text-xl font-bold" { "Transactions" }
                    a id="export-link" href=(export_url) class=(LINK_STYLE) { "Export CSV" }
                }

                (totals_view(totals))

                (filter_form(criteria))

                table class="w-full my-2 text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE)
                            {
                                a href=(sort_link(criteria, SortKey::Date)) data-sort="date"
                                {
                                    "Date" (sort_indicator(criteria, SortKey::Date))
                                }
                            }
                            th scope="col" class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(sort_link(criteria, SortKey::Description))
                                    data-sort="description"
                                {
                                    "Description" (sort_indicator(criteria, SortKey::Description))
                                }
                            }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class="px-6 py-3 text-right"
                            {
                                a href=(sort_link(criteria, SortKey::Amount)) data-sort="amount"
                                {
                                    "Amount" (sort_indicator(criteria, SortKey::Amount))
                                }
                            }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row_view(transaction))
                        }

                        @if transactions.is_empty() {
                            tr
                            {
                                td colspan="5" data-empty-state="true" class="px-6 py-4 text-center"
                                {
                                    (EMPTY_MESSAGE)
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &content)
}

//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState, Error,
    auth::{auth_guard, get_me, post_log_in, post_log_out, put_profile, register_user},
    card_limits::{get_card_limits, put_card_limits},
    endpoints,
    transaction::{
        create_transaction, export_transactions, get_transaction_view, get_transactions,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions).post(create_transaction),
        )
        .route(endpoints::TRANSACTIONS_VIEW_API, get(get_transaction_view))
        .route(endpoints::TRANSACTIONS_EXPORT, get(export_transactions))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(endpoints::LOG_OUT_API, post(post_log_out))
        .route(
            endpoints::CARD_LIMITATIONS_API,
            get(get_card_limits).put(put_card_limits),
        );

    let protected_routes = Router::new()
        .route(endpoints::ME_API, get(get_me))
        .route(endpoints::PROFILE_API, put(put_profile))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}


#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState,
        auth::{COOKIE_SESSION, DEMO_PASSWORD, UserDirectory, UserProfile},
        card_limits::CardLimits,
        endpoints,
        transaction::{InMemoryTransactionStore, Transaction, TransactionView},
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            "42",
            "Etc/UTC",
            InMemoryTransactionStore::with_sample_data(),
            UserDirectory::with_demo_users(4).unwrap(),
        )
        .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn me_without_session_is_unauthorized() {
        let server = get_test_server();

        let response = server.get(endpoints::ME_API).await;

        response.assert_status_unauthorized();
        response.assert_json(&json!({ "error": "Not authenticated" }));
    }

    #[tokio::test]
    async fn log_in_then_me_returns_user() {
        let server = get_test_server();
        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "email": "admin@demo.com", "password": DEMO_PASSWORD }))
            .await;
        response.assert_status_ok();
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server.get(endpoints::ME_API).add_cookie(session_cookie).await;

        response.assert_status_ok();
        let profile: UserProfile = response.json();
        assert_eq!(profile.name, "Jack Watson");
        assert_eq!(profile.email, "admin@demo.com");
        assert_eq!(profile.role, "CTO Assistant");
    }

    #[tokio::test]
    async fn register_then_update_profile() {
        let server = get_test_server();
        let response = server
            .post(endpoints::REGISTER_API)
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "engine" }))
            .await;
        response.assert_status_ok();
        let session_cookie = response.cookie(COOKIE_SESSION);

        let response = server
            .put(endpoints::PROFILE_API)
            .add_cookie(session_cookie.clone())
            .json(&json!({ "name": "Ada Lovelace" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "Profile updated successfully",
            "profile": {
                "id": 3,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "role": "User",
            },
        }));

        let response = server.get(endpoints::ME_API).add_cookie(session_cookie).await;
        let profile: UserProfile = response.json();
        assert_eq!(profile.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn profile_update_requires_session() {
        let server = get_test_server();

        let response = server
            .put(endpoints::PROFILE_API)
            .json(&json!({ "name": "Nobody" }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn created_transaction_shows_up_in_list_and_view() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "description": "Freelance Gig",
                "amount": -300,
                "type": "income",
                "category": "Services",
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let created: Transaction = response.json();
        assert_eq!(created.amount, 300.0);

        let transactions: Vec<Transaction> = server.get(endpoints::TRANSACTIONS_API).await.json();
        assert_eq!(transactions.len(), 9);
        assert_eq!(transactions[0].id, created.id);

        let view: TransactionView = server
            .get(endpoints::TRANSACTIONS_VIEW_API)
            .add_query_param("search", "freelance")
            .await
            .json();
        assert_eq!(view.transactions, vec![created]);
        assert_eq!(view.totals.total_income, 300.0);
    }

    #[tokio::test]
    async fn card_limits_rejected_update_leaves_limits_unchanged() {
        let server = get_test_server();

        server
            .put(endpoints::CARD_LIMITATIONS_API)
            .json(&json!({ "dailyLimit": 9000 }))
            .await
            .assert_status_bad_request();

        let limits: CardLimits = server.get(endpoints::CARD_LIMITATIONS_API).await.json();
        assert_eq!(limits, CardLimits::default());
    }

    #[tokio::test]
    async fn log_out_clears_session() {
        let server = get_test_server();

        let response = server.post(endpoints::LOG_OUT_API).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Logged out successfully" }));
    }

    #[tokio::test]
    async fn transactions_page_renders_html() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("type", "expense")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Office Supplies"));
        assert!(!response.text().contains("Product Sales"));
    }

    #[tokio::test]
    async fn transactions_page_rejects_bad_query_with_html() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("sort", "colour")
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("<!DOCTYPE html>"));
    }
}

//! Handles log-in requests.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{AuthState, UserProfile, set_auth_cookie},
};

/// The credentials sent by the log-in form.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    /// The e-mail the user registered with.
    pub email: String,
    /// The user's plain text password.
    pub password: String,
}

/// The body returned after a successful log-in or registration.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    /// The now logged in user.
    pub user: UserProfile,
}

/// Handler for log-in requests.
///
/// On success the session cookie is set and the user's profile returned.
///
/// # Errors
///
/// Returns an:
/// - [Error::InvalidRequest] if the body is not valid JSON credentials.
/// - [Error::InvalidCredentials] if the e-mail is unknown or the password is wrong.
/// - [Error::LockError] or [Error::HashingError] for internal failures.
pub async fn post_log_in(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    body: Result<Json<LogInData>, JsonRejection>,
) -> Result<(PrivateCookieJar, Json<SessionUser>), Error> {
    let Json(credentials) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let user = state
        .users
        .lock()
        .map_err(|_| Error::LockError("user directory"))?
        .find_by_email(&credentials.email)
        .cloned()
        .ok_or(Error::InvalidCredentials)?;

    if !user.password_hash.verify(&credentials.password)? {
        tracing::debug!("Wrong password for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)?;
    tracing::info!("User {} logged in", user.id);

    let body = SessionUser {
        user: user.profile(),
    };

    Ok((jar, Json(body)))
}

#[cfg(test)]
mod log_in_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        app_state::create_cookie_key,
        auth::{
            AuthState, COOKIE_SESSION, DEFAULT_COOKIE_DURATION, DEMO_PASSWORD, UserDirectory,
            UserID,
        },
        endpoints,
    };

    use super::{SessionUser, post_log_in};

    fn get_test_server() -> TestServer {
        let state = AuthState {
            cookie_key: create_cookie_key("foobar"),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            users: Arc::new(Mutex::new(UserDirectory::with_demo_users(4).unwrap())),
        };
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn log_in_succeeds_with_demo_credentials() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "email": "user@demo.com", "password": DEMO_PASSWORD }))
            .await;

        response.assert_status_ok();
        let body: SessionUser = response.json();
        assert_eq!(body.user.id, UserID::new(2));
        assert_eq!(body.user.name, "Demo User");
        let cookie = response.cookie(COOKIE_SESSION);
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "email": "admin@demo.com", "password": "hunter2" }))
            .await;

        response.assert_status_unauthorized();
        response.assert_json(&json!({ "error": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "email": "nobody@demo.com", "password": DEMO_PASSWORD }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn log_in_rejects_malformed_body() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "email": "admin@demo.com" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "Invalid request" }));
    }
}

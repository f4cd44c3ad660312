//! Handles sign-up requests.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthState, PasswordHash, SessionUser, set_auth_cookie},
};

/// The details sent by the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterData {
    /// The new user's display name.
    pub name: String,
    /// The e-mail to log in with.
    pub email: String,
    /// The plain text password, hashed before it is stored.
    pub password: String,
}

/// Register a new user and log them in.
///
/// # Errors
///
/// Returns an:
/// - [Error::InvalidRequest] if the body is malformed.
/// - [Error::EmptyField] if a field is blank.
/// - [Error::DuplicateEmail] if the e-mail is already taken.
/// - [Error::HashingError], [Error::LockError] or [Error::CookieError] for internal failures.
pub async fn register_user(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    body: Result<Json<RegisterData>, JsonRejection>,
) -> Result<(PrivateCookieJar, Json<SessionUser>), Error> {
    let Json(data) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    if data.password.is_empty() {
        return Err(Error::EmptyField("password"));
    }

    let password_cost = state
        .users
        .lock()
        .map_err(|_| Error::LockError("user directory"))?
        .password_cost();
    let password_hash = PasswordHash::new(&data.password, password_cost)?;

    let user = state
        .users
        .lock()
        .map_err(|_| Error::LockError("user directory"))?
        .register(&data.name, &data.email, password_hash)?;

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)?;
    tracing::info!("Registered user {}", user.id);

    let body = SessionUser {
        user: user.profile(),
    };

    Ok((jar, Json(body)))
}

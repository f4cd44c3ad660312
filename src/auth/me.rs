//! Returns the logged in user.

use axum::{Extension, Json, extract::State};

use crate::{
    Error,
    auth::{AuthState, UserID, UserProfile},
};

/// Get the profile of the user behind the session cookie.
///
/// Must sit behind [crate::auth::auth_guard], which supplies the [UserID].
///
/// # Errors
///
/// Returns [Error::NotAuthenticated] if the session refers to a user that no
/// longer exists.
pub async fn get_me(
    State(state): State<AuthState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<UserProfile>, Error> {
    let users = state
        .users
        .lock()
        .map_err(|_| Error::LockError("user directory"))?;

    match users.get(user_id) {
        Ok(user) => Ok(Json(user.profile())),
        Err(Error::NotFound) => Err(Error::NotAuthenticated),
        Err(error) => Err(error),
    }
}

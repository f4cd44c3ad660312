//! Updating the logged in user's profile.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{AuthState, UserID, UserProfile},
};

/// The profile fields a user may change. Missing fields are left as they are.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    /// The new display name.
    pub name: Option<String>,
    /// The new e-mail address.
    pub email: Option<String>,
}

/// The body returned after a profile update.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdated {
    /// A confirmation for the settings page.
    pub message: String,
    /// The profile after the update.
    pub profile: UserProfile,
}

/// Update the name and/or e-mail of the logged in user.
///
/// # Errors
///
/// Returns an:
/// - [Error::InvalidRequest] if the body is malformed.
/// - [Error::EmptyField] if a supplied field is blank.
/// - [Error::DuplicateEmail] if the new e-mail belongs to someone else.
/// - [Error::NotAuthenticated] if the session refers to a user that no longer exists.
pub async fn put_profile(
    State(state): State<AuthState>,
    Extension(user_id): Extension<UserID>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ProfileUpdated>, Error> {
    let Json(update) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let user = state
        .users
        .lock()
        .map_err(|_| Error::LockError("user directory"))?
        .update_profile(user_id, update.name.as_deref(), update.email.as_deref())
        .map_err(|error| match error {
            Error::NotFound => Error::NotAuthenticated,
            error => error,
        })?;

    tracing::info!("Updated profile of user {user_id}");

    Ok(Json(ProfileUpdated {
        message: "Profile updated successfully".to_owned(),
        profile: user.profile(),
    }))
}

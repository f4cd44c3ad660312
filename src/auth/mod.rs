//! Session authentication: users, password hashes, the session cookie and the handlers for
//! logging in and out.

mod cookie;
mod log_in;
mod log_out;
mod me;
mod middleware;
mod password;
mod profile;
mod register_user;
mod token;
mod user;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{LogInData, SessionUser, post_log_in};
pub use log_out::post_log_out;
pub use me::get_me;
pub use middleware::{AuthState, auth_guard};
pub use password::PasswordHash;
pub use profile::{ProfileUpdate, ProfileUpdated, put_profile};
pub use register_user::{RegisterData, register_user};
pub(crate) use token::Token;
pub use user::{DEFAULT_ROLE, DEMO_PASSWORD, User, UserDirectory, UserID, UserProfile};

#[cfg(test)]
pub(crate) use cookie::COOKIE_SESSION;

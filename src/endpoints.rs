//! The API endpoints URIs.

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying, filtering and sorting transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to get a filtered, sorted and totalled view of the transactions.
pub const TRANSACTIONS_VIEW_API: &str = "/api/transactions/view";
/// The route to download the transactions as a file.
pub const TRANSACTIONS_EXPORT: &str = "/api/transactions/export";
/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/auth/login";
/// The route for the client to log out the current user.
pub const LOG_OUT_API: &str = "/api/auth/logout";
/// The route to register a new user.
pub const REGISTER_API: &str = "/api/auth/register";
/// The route to get the logged in user.
pub const ME_API: &str = "/api/auth/me";
/// The route to update the logged in user's profile.
pub const PROFILE_API: &str = "/api/profile";
/// The route to read and update card spending limits.
pub const CARD_LIMITATIONS_API: &str = "/api/card-limitations";

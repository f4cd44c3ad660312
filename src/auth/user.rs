//! The registered users and their public profiles.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, auth::PasswordHash};

/// A newtype wrapper for integer user IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique within a [UserDirectory].
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The e-mail address used to log in.
    pub email: String,
    /// The user's job title, e.g. "Financial Analyst".
    pub role: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

impl User {
    /// The parts of the user that are safe to send to the client.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// A user without their password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's ID.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The e-mail address used to log in.
    pub email: String,
    /// The user's job title.
    pub role: String,
}

/// The role given to users who sign up themselves.
pub const DEFAULT_ROLE: &str = "User";

/// The password of both demo accounts.
pub const DEMO_PASSWORD: &str = "password";

/// The in-memory list of registered users.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    password_cost: u32,
}

impl UserDirectory {
    /// An empty directory that hashes passwords with [PasswordHash::DEFAULT_COST].
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            password_cost: PasswordHash::DEFAULT_COST,
        }
    }

    /// A directory holding the two demo accounts, hashed with `password_cost`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::HashingError] if a demo password could not be hashed.
    pub fn with_demo_users(password_cost: u32) -> Result<Self, Error> {
        let mut directory = Self {
            users: Vec::new(),
            password_cost,
        };

        for (name, email, role) in [
            ("Jack Watson", "admin@demo.com", "CTO Assistant"),
            ("Demo User", "user@demo.com", "Financial Analyst"),
        ] {
            let password_hash = PasswordHash::new(DEMO_PASSWORD, password_cost)?;
            directory.insert(name, email, role, password_hash)?;
        }

        Ok(directory)
    }

    /// The bcrypt cost used when hashing new passwords.
    pub fn password_cost(&self) -> u32 {
        self.password_cost
    }

    /// Get the user with the ID `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if nobody has that ID.
    pub fn get(&self, user_id: UserID) -> Result<&User, Error> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .ok_or(Error::NotFound)
    }

    /// Find the user registered with `email`.
    ///
    /// E-mail addresses are compared case-insensitively.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    /// Register a new user with the [DEFAULT_ROLE].
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::EmptyField] if `name` or `email` is blank.
    /// - [Error::DuplicateEmail] if somebody already registered with `email`.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        self.insert(name, email, DEFAULT_ROLE, password_hash)
    }

    /// Change the name and/or e-mail of the user with the ID `user_id`.
    ///
    /// Fields that are `None` are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::NotFound] if nobody has that ID.
    /// - [Error::EmptyField] if a supplied field is blank.
    /// - [Error::DuplicateEmail] if another user already has the new e-mail.
    pub fn update_profile(
        &mut self,
        user_id: UserID,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, Error> {
        let name = name.map(|name| non_empty("name", name)).transpose()?;
        let email = email.map(|email| non_empty("email", email)).transpose()?;

        if let Some(email) = email {
            let taken = self
                .find_by_email(email)
                .is_some_and(|other| other.id != user_id);
            if taken {
                return Err(Error::DuplicateEmail(email.to_owned()));
            }
        }

        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or(Error::NotFound)?;

        if let Some(name) = name {
            user.name = name.to_owned();
        }
        if let Some(email) = email {
            user.email = email.to_owned();
        }

        Ok(user.clone())
    }

    fn insert(
        &mut self,
        name: &str,
        email: &str,
        role: &str,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        let name = non_empty("name", name)?;
        let email = non_empty("email", email)?;

        if self.find_by_email(email).is_some() {
            return Err(Error::DuplicateEmail(email.to_owned()));
        }

        let next_id = self
            .users
            .iter()
            .map(|user| user.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        let user = User {
            id: UserID::new(next_id),
            name: name.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            password_hash,
        };
        self.users.push(user.clone());

        Ok(user)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, Error> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(Error::EmptyField(field))
    } else {
        Ok(trimmed)
    }
}

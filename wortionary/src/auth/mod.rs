//! Mock authentication.
//!
//! Nothing here verifies anyone. A [`SessionProvider`] decides what a
//! "session" is; [`DemoSessionProvider`] accepts one hardcoded account and
//! keeps the session in local storage in plain text. [`AuthStore`] wraps any
//! provider and publishes the resulting state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod demo;
mod store;

pub use demo::{DemoSessionProvider, DEMO_EMAIL, DEMO_PASSWORD};
pub use store::{AuthState, AuthStore};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("No authenticated user")]
    NotAuthenticated,
    #[error("No refresh token available")]
    NoRefreshToken,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("corrupt session record: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match &value.trim().to_ascii_lowercase()[..] {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub language: String,
    pub notifications: bool,
    pub search_history: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            language: "en".to_owned(),
            notifications: true,
            search_history: true,
        }
    }
}

/// Display/session record. Not a security principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub accept_terms: bool,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return invalid("Email is required");
        }
        if self.password.is_empty() {
            return invalid("Password is required");
        }
        if self.password.chars().count() < 6 {
            return invalid("Password must be at least 6 characters");
        }
        Ok(())
    }
}

impl RegisterCredentials {
    /// Form-level checks, reported one at a time in field order.
    pub fn validate(&self) -> Result<(), AuthError> {
        let names = [(&self.first_name, "First name"), (&self.last_name, "Last name")];
        for (value, field) in names {
            let length = value.trim().chars().count();
            if length == 0 {
                return invalid(&format!("{field} is required"));
            }
            if !(2..=50).contains(&length) {
                return invalid(&format!("{field} must be between 2 and 50 characters"));
            }
        }
        let username_length = self.username.chars().count();
        if !(3..=20).contains(&username_length) {
            return invalid("Username must be between 3 and 20 characters");
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return invalid("Username can only contain letters, numbers, and underscores");
        }
        if !is_email(&self.email) {
            return invalid("Please enter a valid email address");
        }
        if self.password.chars().count() < 8 {
            return invalid("Password must be at least 8 characters");
        }
        let has = |predicate: fn(&char) -> bool| self.password.chars().any(|c| predicate(&c));
        if !(has(char::is_ascii_lowercase)
            && has(char::is_ascii_uppercase)
            && has(char::is_ascii_digit))
        {
            return invalid(
                "Password must contain at least one uppercase letter, one lowercase letter, and one number",
            );
        }
        if self.password != self.confirm_password {
            return invalid("Passwords don't match");
        }
        if !self.accept_terms {
            return invalid("You must accept the terms and conditions");
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Result<(), AuthError> {
    Err(AuthError::Validation(message.to_owned()))
}

pub(crate) fn is_email(value: &str) -> bool {
    match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Fields to overwrite on the current user; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub preferences: Option<UserPreferences>,
}

impl ProfileUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(preferences) = self.preferences {
            user.preferences = preferences;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub refresh_token: String,
}

/// Where sessions come from. Swap the implementation to plug in a real
/// identity backend.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError>;

    async fn register(&self, credentials: &RegisterCredentials) -> Result<Session, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    async fn current_user(&self) -> Result<Option<User>, AuthError>;

    async fn is_authenticated(&self) -> Result<bool, AuthError>;

    /// Rotates the session tokens, returning the new access token.
    async fn refresh(&self) -> Result<String, AuthError>;

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError>;

    async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

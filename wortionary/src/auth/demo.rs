use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Utc};

use super::{
    is_email, AuthError, LoginCredentials, ProfileUpdate, RegisterCredentials, Session,
    SessionProvider, User, UserPreferences,
};
use crate::storage::Storage;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

const DEMO_AVATAR: &str = "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face&auto=format";

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "authToken";
const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Advisory only; nothing checks it.
const TOKEN_EXPIRES_KEY: &str = "authTokenExpires";

const REMEMBERED_TOKEN_DAYS: u64 = 7;
const SESSION_TOKEN_DAYS: u64 = 1;

/// Accepts the single demo account and persists the session, unencrypted, in
/// local storage.
#[derive(Clone)]
pub struct DemoSessionProvider {
    storage: Storage,
    latency: Duration,
}

impl DemoSessionProvider {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            latency: Duration::ZERO,
        }
    }

    /// Delay every call, to mimic a remote identity service.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn demo_user() -> User {
        User {
            id: "1".to_owned(),
            email: DEMO_EMAIL.to_owned(),
            username: "demo_user".to_owned(),
            first_name: "Alex".to_owned(),
            last_name: "Johnson".to_owned(),
            avatar: Some(DEMO_AVATAR.to_owned()),
            created_at: Utc::now(),
            preferences: UserPreferences::default(),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Writes the user before the tokens and clears both if either write fails.
    async fn start_session(&self, user: User, remember: bool) -> Result<Session, AuthError> {
        let written = match self.set_user(&user).await {
            Ok(()) => self.set_tokens(remember).await,
            Err(error) => Err(error),
        };
        let (token, refresh_token) = match written {
            Ok(tokens) => tokens,
            Err(error) => {
                if let Err(cleanup) = self.clear().await {
                    tracing::warn!(%cleanup, "failed to clear a half-written session");
                }
                return Err(error);
            }
        };
        Ok(Session {
            user,
            token,
            refresh_token,
        })
    }

    async fn set_tokens(&self, remember: bool) -> Result<(String, String), AuthError> {
        let now = Utc::now();
        let stamp = now.timestamp_millis();
        let token = format!("mock-jwt-token-{stamp}");
        let refresh_token = format!("mock-refresh-token-{stamp}");
        let days = if remember {
            REMEMBERED_TOKEN_DAYS
        } else {
            SESSION_TOKEN_DAYS
        };
        let expires = now.checked_add_days(Days::new(days)).unwrap_or(now);

        self.storage.set_item(TOKEN_KEY, &token).await?;
        self.storage.set_item(REFRESH_TOKEN_KEY, &refresh_token).await?;
        self.storage
            .set_item(TOKEN_EXPIRES_KEY, &expires.to_rfc3339())
            .await?;
        Ok((token, refresh_token))
    }

    async fn set_user(&self, user: &User) -> Result<(), AuthError> {
        let record = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &record).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_EXPIRES_KEY, USER_KEY] {
            self.storage.remove_item(key).await?;
        }
        Ok(())
    }

    pub async fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.storage.get_item(TOKEN_KEY).await?)
    }
}

#[async_trait]
impl SessionProvider for DemoSessionProvider {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        credentials.validate()?;
        self.simulate_latency().await;
        if credentials.email.trim() != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        self.start_session(Self::demo_user(), credentials.remember_me)
            .await
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<Session, AuthError> {
        credentials.validate()?;
        self.simulate_latency().await;
        let now = Utc::now();
        let user = User {
            id: now.timestamp_millis().to_string(),
            email: credentials.email.trim().to_owned(),
            username: credentials.username.clone(),
            first_name: credentials.first_name.trim().to_owned(),
            last_name: credentials.last_name.trim().to_owned(),
            avatar: None,
            created_at: now,
            preferences: UserPreferences::default(),
        };
        self.start_session(user, false).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.clear().await
    }

    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let Some(record) = self.storage.get_item(USER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&record) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable stored user");
                Ok(None)
            }
        }
    }

    async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.token().await?.is_some() && self.current_user().await?.is_some())
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        self.simulate_latency().await;
        if self.storage.get_item(REFRESH_TOKEN_KEY).await?.is_none() {
            self.clear().await?;
            return Err(AuthError::NoRefreshToken);
        }
        let (token, _) = self.set_tokens(true).await?;
        Ok(token)
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        let mut user = self
            .current_user()
            .await?
            .ok_or(AuthError::NotAuthenticated)?;
        update.apply_to(&mut user);
        self.set_user(&user).await?;
        Ok(user)
    }

    async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        if self.current_user().await?.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        if current.is_empty() {
            return Err(AuthError::Validation("Current password is required".to_owned()));
        }
        if new.chars().count() < 8 {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_owned(),
            ));
        }
        self.simulate_latency().await;
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        if !is_email(email) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".to_owned(),
            ));
        }
        self.simulate_latency().await;
        tracing::info!(email, "password reset requested");
        Ok(())
    }
}

use std::sync::Arc;

use tokio::sync::watch;

use super::{AuthError, LoginCredentials, ProfileUpdate, RegisterCredentials, SessionProvider, User};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Publishes the session produced by a [`SessionProvider`].
///
/// Operations return the provider's error as well as recording its message
/// in the state, so callers can either react directly or render the state.
pub struct AuthStore {
    provider: Arc<dyn SessionProvider>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { provider, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn start_loading(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn signed_in(&self, user: User) {
        self.state.send_modify(|state| {
            *state = AuthState {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
                error: None,
            }
        });
    }

    fn signed_out(&self, error: Option<String>) {
        self.state.send_modify(|state| {
            *state = AuthState {
                user: None,
                is_authenticated: false,
                is_loading: false,
                error,
            }
        });
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        self.start_loading();
        match self.provider.login(credentials).await {
            Ok(session) => {
                tracing::info!(user = %session.user.username, "signed in");
                tracing::debug!(
                    issued = !session.token.is_empty() && !session.refresh_token.is_empty(),
                    "session tokens"
                );
                self.signed_in(session.user.clone());
                Ok(session.user)
            }
            Err(error) => {
                tracing::warn!(%error, "login failed");
                self.signed_out(Some(error.to_string()));
                Err(error)
            }
        }
    }

    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<User, AuthError> {
        self.start_loading();
        match self.provider.register(credentials).await {
            Ok(session) => {
                tracing::info!(user = %session.user.username, "registered");
                tracing::debug!(
                    issued = !session.token.is_empty() && !session.refresh_token.is_empty(),
                    "session tokens"
                );
                self.signed_in(session.user.clone());
                Ok(session.user)
            }
            Err(error) => {
                tracing::warn!(%error, "registration failed");
                self.signed_out(Some(error.to_string()));
                Err(error)
            }
        }
    }

    /// Always ends signed out, even if the provider could not clear storage.
    pub async fn logout(&self) {
        self.state.send_modify(|state| state.is_loading = true);
        if let Err(error) = self.provider.logout().await {
            tracing::warn!(%error, "failed to clear stored session");
        } else {
            tracing::info!("signed out");
        }
        self.signed_out(None);
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Option<User>, AuthError> {
        if self.state.borrow().user.is_none() {
            return Ok(None);
        }
        self.start_loading();
        match self.provider.update_profile(update).await {
            Ok(user) => {
                self.state.send_modify(|state| {
                    state.user = Some(user.clone());
                    state.is_loading = false;
                });
                Ok(Some(user))
            }
            Err(error) => {
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = Some(error.to_string());
                });
                Err(error)
            }
        }
    }

    /// Leaves the published state untouched; failures are only returned.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        self.provider.change_password(current, new).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.provider.request_password_reset(email).await
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    /// Restores whatever session the provider has persisted.
    pub async fn check_auth(&self) -> Result<(), AuthError> {
        let user = self.provider.current_user().await?;
        let is_authenticated = self.provider.is_authenticated().await?;
        tracing::debug!(is_authenticated, "restored session");
        self.state.send_modify(|state| {
            state.user = user;
            state.is_authenticated = is_authenticated;
            state.is_loading = false;
        });
        Ok(())
    }

    pub async fn refresh_auth(&self) -> Result<(), AuthError> {
        let refreshed = match self.provider.refresh().await {
            Ok(token) => self
                .provider
                .current_user()
                .await
                .map(|user| (user, !token.is_empty())),
            Err(error) => Err(error),
        };
        match refreshed {
            Ok((user, is_authenticated)) => {
                self.state.send_modify(|state| {
                    state.user = user;
                    state.is_authenticated = is_authenticated;
                    state.error = None;
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "session refresh failed");
                self.signed_out(Some("Session expired".to_owned()));
                Err(error)
            }
        }
    }
}

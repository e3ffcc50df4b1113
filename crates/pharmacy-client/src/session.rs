//! The session resolver.
//!
//! [`SessionContext`] owns the console's view of who is signed in. It starts
//! in [`SessionState::Loading`], settles once [`SessionContext::initialize`]
//! has asked the server, and publishes every change on a watch channel.
//! Resolution never fails: anything that goes wrong ends as "no user".

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use pharmacy_auth::guard::SessionState;
use pharmacy_core::error::AppError;
use pharmacy_core::result::AppResult;
use pharmacy_entity::user::UserProfile;

use crate::api::AuthApi;
use crate::navigator::Navigator;
use crate::storage::{ClientStorage, FLASH_KEY, TOKEN_KEY};

/// Flash message set after a successful login.
pub const LOGIN_SUCCESS: &str = "login_success";

/// Shared session state plus the operations that change it.
#[derive(Debug)]
pub struct SessionContext {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn ClientStorage>,
    navigator: Arc<dyn Navigator>,
    home_route: String,
    state: watch::Sender<SessionState>,
}

impl SessionContext {
    /// A context in the loading state. Call [`initialize`](Self::initialize) next.
    pub fn new(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn ClientStorage>,
        navigator: Arc<dyn Navigator>,
        home_route: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            api,
            storage,
            navigator,
            home_route: home_route.into(),
            state,
        }
    }

    /// Resolve the persisted token into a user.
    pub async fn initialize(&self) -> SessionState {
        self.publish(SessionState::Loading);
        let resolved = self.resolve().await;
        self.publish(resolved.clone());
        resolved
    }

    /// Ask the server again, keeping the current state visible meanwhile.
    pub async fn refresh(&self) -> SessionState {
        let resolved = self.resolve().await;
        self.publish(resolved.clone());
        resolved
    }

    async fn resolve(&self) -> SessionState {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => return SessionState::anonymous(),
            Err(e) => {
                warn!(error = %e, "Could not read persisted token");
                return SessionState::anonymous();
            }
        };

        match self.api.me(&token).await {
            Ok(user) => {
                debug!(user_id = %user.id, role = %user.role, "Session resolved");
                SessionState::authenticated(user)
            }
            Err(e) if e.is_authentication() => {
                info!(reason = %e.message, "Persisted token rejected; discarding it");
                self.forget_token();
                SessionState::anonymous()
            }
            Err(e) => {
                warn!(error = %e, "Could not resolve session; continuing signed out");
                SessionState::anonymous()
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Whether resolution is still running.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Sign in and persist the token.
    ///
    /// Every failure, including an unreachable server, is reported as an
    /// authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let result = self.api.login(email, password).await.map_err(|e| {
            if e.is_authentication() {
                e
            } else {
                AppError::authentication(format!("Sign-in failed: {}", e.message))
            }
        })?;

        self.storage.set(TOKEN_KEY, &result.token)?;
        if let Err(e) = self.storage.set(FLASH_KEY, LOGIN_SUCCESS) {
            warn!(error = %e, "Could not store login flash message");
        }

        info!(user_id = %result.user.id, "Signed in");
        self.publish(SessionState::authenticated(result.user.clone()));
        Ok(result.user)
    }

    /// Sign out: revoke server-side when possible, drop the token, go home.
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            if let Err(e) = self.api.logout(&token).await {
                debug!(error = %e, "Server-side logout failed; clearing locally");
            }
        }

        self.forget_token();
        self.publish(SessionState::anonymous());
        self.navigator.replace(&self.home_route);
        info!("Signed out");
    }

    /// Read and clear the flash message.
    pub fn take_flash(&self) -> Option<String> {
        let message = self.storage.get(FLASH_KEY).ok().flatten()?;
        if let Err(e) = self.storage.remove(FLASH_KEY) {
            warn!(error = %e, "Could not clear flash message");
        }
        Some(message)
    }

    /// The persisted token, if any.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).ok().flatten()
    }

    fn forget_token(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            error!(error = %e, "Could not remove persisted token; it will be offered again next start");
        }
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}

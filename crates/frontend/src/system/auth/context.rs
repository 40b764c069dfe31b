use std::future::Future;

use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{AuthEvent, AuthState, Session};
use super::{api, storage};
use crate::shared::api_utils::{ApiClient, ApiError};

/// Application auth store, injected through context.
///
/// Owns the `AuthState` signal and the token storage; components never touch
/// localStorage or build auth headers themselves.
#[derive(Clone, Copy)]
pub struct AuthStore {
    state: RwSignal<AuthState>,
    base: StoredValue<String>,
}

impl AuthStore {
    pub fn new(api_base: String) -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            base: StoredValue::new(api_base),
        }
    }

    fn dispatch(&self, event: AuthEvent) {
        self.state
            .update(|state| *state = std::mem::take(state).apply(event));
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated())
    }

    pub fn is_restoring(&self) -> bool {
        self.state.with(|s| matches!(s, AuthState::Restoring))
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user().cloned())
    }

    /// Current user id without subscribing to changes
    pub fn user_id(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.user().map(|u| u.id.clone()))
    }

    pub fn api_base(&self) -> String {
        self.base.get_value()
    }

    /// Client carrying the current access token
    pub fn client(&self) -> ApiClient {
        let token = self
            .state
            .with_untracked(|s| s.access_token().map(str::to_string));
        ApiClient::new(self.api_base(), token)
    }

    pub async fn login(&self, username: String, password: String) -> Result<(), ApiError> {
        let response = api::login(&self.api_base(), username, password).await?;
        storage::save_tokens(&response.access_token, &response.refresh_token);
        log::info!("signed in as {}", response.user.username);
        self.dispatch(AuthEvent::SignedIn(Session {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: response.user,
        }));
        Ok(())
    }

    pub async fn logout(&self) {
        let refresh = self
            .state
            .with_untracked(|s| s.session().map(|s| s.refresh_token.clone()))
            .or_else(storage::get_refresh_token);
        if let Some(refresh_token) = refresh {
            // Revocation is best effort; the local session ends regardless.
            if let Err(e) = api::logout(&self.api_base(), refresh_token).await {
                log::warn!("logout request failed: {}", e);
            }
        }
        storage::clear_tokens();
        self.dispatch(AuthEvent::SignedOut);
        log::info!("signed out");
    }

    /// Exchanges the refresh token for a new access token. A rejected refresh
    /// ends the session.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let refresh_token = self
            .state
            .with_untracked(|s| s.session().map(|s| s.refresh_token.clone()))
            .ok_or(ApiError::Unauthorized)?;

        match api::refresh_token(&self.api_base(), refresh_token).await {
            Ok(response) => {
                match response.refresh_token.as_deref() {
                    Some(rotated) => storage::save_tokens(&response.access_token, rotated),
                    None => storage::save_access_token(&response.access_token),
                }
                self.dispatch(AuthEvent::AccessRefreshed {
                    access_token: response.access_token,
                    refresh_token: response.refresh_token,
                });
                log::info!("access token refreshed");
                Ok(())
            }
            Err(e) => {
                log::warn!("token refresh failed: {}", e);
                storage::clear_tokens();
                self.dispatch(AuthEvent::SignedOut);
                Err(e)
            }
        }
    }

    /// Restores the session from stored tokens on startup
    pub async fn restore(&self) {
        let Some(access_token) = storage::get_access_token() else {
            return;
        };
        let refresh_token = storage::get_refresh_token();
        self.dispatch(AuthEvent::RestoreStarted);

        let base = self.api_base();
        if let Ok(user) = api::get_current_user(&base, &access_token).await {
            self.dispatch(AuthEvent::SignedIn(Session {
                access_token,
                refresh_token: refresh_token.unwrap_or_default(),
                user,
            }));
            return;
        }

        // Access token rejected, try refresh
        if let Some(refresh_token) = refresh_token {
            if let Ok(response) = api::refresh_token(&base, refresh_token.clone()).await {
                let refresh_token = response.refresh_token.unwrap_or(refresh_token);
                storage::save_tokens(&response.access_token, &refresh_token);
                if let Ok(user) = api::get_current_user(&base, &response.access_token).await {
                    self.dispatch(AuthEvent::SignedIn(Session {
                        access_token: response.access_token,
                        refresh_token,
                        user,
                    }));
                    return;
                }
            }
        }

        log::warn!("stored session could not be restored");
        storage::clear_tokens();
        self.dispatch(AuthEvent::RestoreFailed);
    }

    /// Runs an authorized request, refreshing the access token once if the
    /// backend answers 401.
    pub async fn call<T, F, Fut>(&self, request: F) -> Result<T, ApiError>
    where
        F: Fn(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match request(self.client()).await {
            Err(ApiError::Unauthorized) if self.state.with_untracked(|s| s.is_authenticated()) => {
                self.refresh().await?;
                request(self.client()).await
            }
            other => other,
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(api_base: String, children: ChildrenFn) -> impl IntoView {
    let store = AuthStore::new(api_base);
    provide_context(store);

    // Try to restore session from localStorage on mount
    spawn_local(async move {
        store.restore().await;
    });

    children()
}

/// Hook to access the auth store
pub fn use_auth() -> AuthStore {
    use_context::<AuthStore>().expect("AuthProvider not found in component tree")
}

//! Authentication state machine.
//!
//! Every change to the signed-in state goes through [`AuthState::apply`], so
//! the possible transitions are listed in one place.

use contracts::system::auth::UserInfo;

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Anonymous,
    /// Stored tokens found, validating them with the provider
    Restoring,
    Authenticated(Session),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthEvent {
    RestoreStarted,
    SignedIn(Session),
    AccessRefreshed {
        access_token: String,
        refresh_token: Option<String>,
    },
    RestoreFailed,
    SignedOut,
}

impl AuthEvent {
    fn label(&self) -> &'static str {
        match self {
            AuthEvent::RestoreStarted => "restore-started",
            AuthEvent::SignedIn(_) => "signed-in",
            AuthEvent::AccessRefreshed { .. } => "access-refreshed",
            AuthEvent::RestoreFailed => "restore-failed",
            AuthEvent::SignedOut => "signed-out",
        }
    }
}

impl AuthState {
    pub fn apply(self, event: AuthEvent) -> AuthState {
        match (self, event) {
            (AuthState::Anonymous, AuthEvent::RestoreStarted) => AuthState::Restoring,
            (_, AuthEvent::SignedIn(session)) => AuthState::Authenticated(session),
            (
                AuthState::Authenticated(mut session),
                AuthEvent::AccessRefreshed {
                    access_token,
                    refresh_token,
                },
            ) => {
                session.access_token = access_token;
                if let Some(rotated) = refresh_token {
                    session.refresh_token = rotated;
                }
                AuthState::Authenticated(session)
            }
            (AuthState::Restoring, AuthEvent::RestoreFailed) => AuthState::Anonymous,
            (_, AuthEvent::SignedOut) => AuthState::Anonymous,
            (state, event) => {
                log::warn!("ignoring auth event {} in state {}", event.label(), state.label());
                state
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AuthState::Anonymous => "anonymous",
            AuthState::Restoring => "restoring",
            AuthState::Authenticated(_) => "authenticated",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.session().map(|s| &s.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            user: UserInfo {
                id: "7".into(),
                username: "caja1".into(),
                full_name: None,
                email: None,
                is_admin: false,
            },
        }
    }

    #[test]
    fn test_login_and_logout() {
        let state = AuthState::default().apply(AuthEvent::SignedIn(session()));
        assert!(state.is_authenticated());
        assert_eq!(state.access_token(), Some("access-1"));
        assert_eq!(state.user().map(|u| u.username.as_str()), Some("caja1"));

        let state = state.apply(AuthEvent::SignedOut);
        assert_eq!(state, AuthState::Anonymous);
    }

    #[test]
    fn test_refresh_replaces_access_token() {
        let state = AuthState::Authenticated(session()).apply(AuthEvent::AccessRefreshed {
            access_token: "access-2".into(),
            refresh_token: None,
        });
        let s = state.session().unwrap();
        assert_eq!(s.access_token, "access-2");
        assert_eq!(s.refresh_token, "refresh-1");

        let state = state.apply(AuthEvent::AccessRefreshed {
            access_token: "access-3".into(),
            refresh_token: Some("refresh-2".into()),
        });
        assert_eq!(state.session().unwrap().refresh_token, "refresh-2");
    }

    #[test]
    fn test_refresh_while_anonymous_is_ignored() {
        let state = AuthState::Anonymous.apply(AuthEvent::AccessRefreshed {
            access_token: "x".into(),
            refresh_token: None,
        });
        assert_eq!(state, AuthState::Anonymous);
    }

    #[test]
    fn test_restore_flow() {
        let restoring = AuthState::Anonymous.apply(AuthEvent::RestoreStarted);
        assert_eq!(restoring, AuthState::Restoring);
        assert!(!restoring.is_authenticated());

        assert_eq!(
            restoring.clone().apply(AuthEvent::RestoreFailed),
            AuthState::Anonymous
        );
        assert!(restoring
            .apply(AuthEvent::SignedIn(session()))
            .is_authenticated());
    }

    #[test]
    fn test_restore_cannot_start_over_a_session() {
        let state = AuthState::Authenticated(session()).apply(AuthEvent::RestoreStarted);
        assert!(state.is_authenticated());
        let state = state.apply(AuthEvent::RestoreFailed);
        assert!(state.is_authenticated());
    }
}

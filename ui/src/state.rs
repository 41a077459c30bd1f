use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn {
        token: String,
    },
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Authentication (managed by use_auth) ===
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn { .. })
    }

    /// The bearer token of the current session, if there is one.
    pub fn token(&self) -> Option<&str> {
        match &self.auth_state {
            AuthState::LoggedIn { token } => Some(token),
            AuthState::LoggedOut => None,
        }
    }

    /// Start a session. Blank tokens are treated as logging out.
    pub fn login(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            self.logout();
        } else {
            self.auth_state = AuthState::LoggedIn {
                token: token.to_string(),
            };
        }
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}

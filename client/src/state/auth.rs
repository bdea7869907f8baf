#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
///
/// `loading` starts `true` so pages hold off on the login redirect until the
/// initial `get-session` probe has resolved.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// Record the outcome of a session probe or sign-in.
    pub fn resolve(&mut self, user: Option<User>) {
        self.user = user;
        self.loading = false;
    }
}

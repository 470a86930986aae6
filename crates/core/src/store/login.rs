use std::fmt::Display;
use std::future::Future;

use tokio::sync::watch;

use super::InFlight;
use crate::auth::{LoginPayload, User};

/// The two authentication use cases the login store drives
pub trait Authenticator {
    type Error: Display;

    /// Exchange credentials for a user carrying an access token
    fn login(&self, payload: &LoginPayload) -> impl Future<Output = Result<User, Self::Error>>;

    /// Fetch the full profile of the user owning `token`
    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, Self::Error>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub user: Option<User>,
}

impl LoginState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct LoginStore<A> {
    state: watch::Sender<LoginState>,
    auth: A,
}

impl<A: Authenticator> LoginStore<A> {
    pub fn new(auth: A) -> Self {
        Self {
            state: watch::Sender::new(LoginState::default()),
            auth,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LoginState {
        self.state.borrow().clone()
    }

    /// Log in, then upgrade the user to the full profile
    ///
    /// A failing profile fetch does not fail the login; the user returned by
    /// the token exchange is kept instead.
    pub async fn login(&self, payload: &LoginPayload) -> Result<User, A::Error> {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
        let _in_flight = InFlight::new(&self.state, |state: &mut LoginState| {
            state.is_loading = false
        });

        let user = match self.auth.login(payload).await {
            Ok(user) => user,
            Err(err) => {
                let message = match err.to_string() {
                    m if m.is_empty() => "Login failed".to_string(),
                    m => m,
                };
                log::warn!("login failed: {message}");
                self.state.send_modify(|state| state.error = Some(message));
                return Err(err);
            }
        };

        self.set_user(Some(user.clone()));

        if user.token.is_empty() {
            return Ok(user);
        }

        match self.auth.current_user(&user.token).await {
            Ok(mut profile) => {
                profile.token = user.token;
                profile.refresh_token = profile.refresh_token.or(user.refresh_token);
                self.set_user(Some(profile.clone()));
                Ok(profile)
            }
            Err(err) => {
                log::warn!("Failed to fetch user profile: {err}");
                Ok(user)
            }
        }
    }

    pub fn logout(&self) {
        self.state.send_modify(|state| {
            state.user = None;
            state.error = None;
        });
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|state| state.user = user);
    }
}

//! Observable stores
//!
//! Each store owns its state inside a [`tokio::sync::watch`] channel and
//! publishes a new snapshot on every mutation. Collaborators (the fetch
//! function, the authenticator) are injected through the constructor.
//!
//! Store methods take `&self` and never hold the state across an `.await`,
//! so a UI event loop can start an operation while another is in flight.

use tokio::sync::watch;

mod list;
mod login;

pub use list::{FetchPage, ListState, ListStore, Page};
pub use login::{Authenticator, LoginState, LoginStore};

/// Clears an in-progress flag when dropped.
///
/// Covers success, error and a cancelled (dropped) operation future alike.
struct InFlight<'a, S> {
    state: &'a watch::Sender<S>,
    clear: fn(&mut S),
}

impl<'a, S> InFlight<'a, S> {
    fn new(state: &'a watch::Sender<S>, clear: fn(&mut S)) -> Self {
        Self { state, clear }
    }
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(self.clear);
    }
}

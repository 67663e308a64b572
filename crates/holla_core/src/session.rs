//! Identity and session state machine.
//!
//! # Responsibility
//! - Track the remembered identity (durable) and the authenticated flag
//!   (transient per runtime session).
//!
//! # Invariants
//! - `authenticated` implies a remembered user exists.
//! - Logout never forgets the remembered user; the next launch prompts the
//!   same identity to re-authenticate.
//! - There is no transition back to `NoIdentity` from this core.

use crate::store::{keys, KeyValueStore, StoreResult};
use log::{info, warn};
use std::rc::Rc;

/// Observable session state for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoIdentity,
    RememberedUnauthenticated,
    Authenticated,
}

/// Session manager over the shared durable store.
///
/// Only the remembered-identity pointer is persisted; authentication state
/// always starts false on load, even for a remembered user.
pub struct SessionManager<S: KeyValueStore> {
    store: Rc<S>,
    remembered_user: Option<String>,
    authenticated: bool,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Creates the session by reading the remembered-identity key.
    ///
    /// A remembered user starts unauthenticated; login is always required.
    pub fn load(store: Rc<S>) -> StoreResult<Self> {
        let remembered_user = store
            .get(keys::REMEMBERED_USER_KEY)?
            .filter(|value| !value.trim().is_empty());
        Ok(Self {
            store,
            remembered_user,
            authenticated: false,
        })
    }

    pub fn remembered_user(&self) -> Option<&str> {
        self.remembered_user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn state(&self) -> SessionState {
        match (&self.remembered_user, self.authenticated) {
            (None, _) => SessionState::NoIdentity,
            (Some(_), false) => SessionState::RememberedUnauthenticated,
            (Some(_), true) => SessionState::Authenticated,
        }
    }

    /// Records a successful login: persists the remembered identity and
    /// marks the session authenticated.
    ///
    /// A whitespace-only user id is rejected as a logged no-op, returning
    /// `Ok(false)`.
    pub fn login_success(&mut self, user_id: &str) -> StoreResult<bool> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            warn!("event=login_rejected module=session status=noop reason=empty_user_id");
            return Ok(false);
        }

        self.store.set(keys::REMEMBERED_USER_KEY, user_id)?;
        self.remembered_user = Some(user_id.to_string());
        self.authenticated = true;
        info!("event=login module=session status=ok");
        Ok(true)
    }

    /// Drops authentication while keeping the remembered identity.
    pub fn logout(&mut self) {
        self.authenticated = false;
        info!("event=logout module=session status=ok");
    }
}

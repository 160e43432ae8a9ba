//! # Auth State
//!
//! Mirrors the identity provider into process-local observable state.
//!
//! [`AuthState::spawn`] subscribes once to the provider's notifications. For each one it
//! either clears the current user or sets a [`User`] built from the provider's id and email,
//! with the default role and the notification time as `created_at`. Until the first
//! notification has been handled the state reports `is_loading`.
//!
//! ```rust
//! use clinic_directory::auth::{AuthState, LocalIdentityProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = LocalIdentityProvider::new();
//!     let (auth, _task) = AuthState::spawn(provider.subscribe());
//!
//!     provider.sign_in("uid-1", "owner@example.com");
//!     let user = auth.wait_for_user().await.unwrap();
//!     assert_eq!(user.email, "owner@example.com");
//! }
//! ```

mod provider;

pub use provider::*;

use crate::model::User;
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// One snapshot of the auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

/// Read handle to the auth state. Cheap to clone.
#[derive(Clone)]
pub struct AuthState {
    state: watch::Receiver<AuthSnapshot>,
}

impl AuthState {
    /// Starts the task that follows `identities`. It ends when the provider goes away, leaving
    /// the last state in place.
    pub fn spawn(mut identities: watch::Receiver<Option<Identity>>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = watch::channel(AuthSnapshot::default());

        let handle = tokio::spawn(async move {
            loop {
                let identity = identities.borrow_and_update().clone();
                let user = identity
                    .map(|identity| User::new(identity.uid, identity.email, Utc::now()));
                match &user {
                    Some(user) => info!(user_id = %user.id, "Auth state: signed in"),
                    None => info!("Auth state: signed out"),
                }
                tx.send_replace(AuthSnapshot {
                    user,
                    is_loading: false,
                });

                if identities.changed().await.is_err() {
                    debug!("Identity provider closed");
                    break;
                }
            }
        });

        (Self { state: rx }, handle)
    }

    /// A state that never changes. Useful where no provider is wired.
    pub fn fixed(user: Option<User>) -> Self {
        let (_, rx) = watch::channel(AuthSnapshot {
            user,
            is_loading: false,
        });
        Self { state: rx }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.clone()
    }

    /// Waits for the first notification to be handled, then returns the user, if any.
    pub async fn wait_until_loaded(&self) -> Option<User> {
        let mut state = self.state.clone();
        if let Ok(snapshot) = state.wait_for(|snapshot| !snapshot.is_loading).await {
            return snapshot.user.clone();
        }
        self.current_user()
    }

    /// Waits until someone is signed in. Returns `None` if the state can no longer change.
    pub async fn wait_for_user(&self) -> Option<User> {
        let mut state = self.state.clone();
        let snapshot = state.wait_for(|snapshot| snapshot.user.is_some()).await.ok()?;
        snapshot.user.clone()
    }
}

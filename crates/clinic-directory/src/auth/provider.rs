//! The identity provider side: who is signed in, as an observable value.

use tokio::sync::watch;
use tracing::info;

/// What the provider knows about a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// An in-process identity provider.
///
/// Holds the current identity (`None` when signed out) and notifies subscribers on every
/// change. Dropping the provider ends the notification stream.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    current: watch::Sender<Option<Identity>>,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalIdentityProvider {
    /// Starts signed out.
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    pub fn sign_in(&self, uid: impl Into<String>, email: impl Into<String>) {
        let identity = Identity {
            uid: uid.into(),
            email: email.into(),
        };
        info!(uid = %identity.uid, "Signed in");
        self.current.send_replace(Some(identity));
    }

    pub fn sign_out(&self) {
        info!("Signed out");
        self.current.send_replace(None);
    }

    /// Identity-change notifications. The current identity is delivered first.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}

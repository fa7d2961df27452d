//! Current-session publication.
//!
//! The signed-in user is held in one place and passed to the closet
//! explicitly. Screens that need to react to sign-in or sign-out subscribe;
//! dropping the subscription detaches it.

use std::sync::Arc;

use closet_sdk::models::Session;
use tokio::sync::watch;
use tracing::debug;

use super::error::DomainError;

/// Cloneable handle to the current session. All clones share one slot.
#[derive(Clone)]
pub struct SessionHub {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// The current session, or `Unauthenticated` when signed out.
    ///
    /// # Errors
    /// Returns `DomainError::Unauthenticated` if nobody is signed in.
    pub fn require(&self) -> Result<Session, DomainError> {
        self.current().ok_or(DomainError::Unauthenticated)
    }

    /// Replace the current session and wake every subscriber.
    pub fn publish(&self, session: Option<Session>) {
        debug!(
            user_id = ?session.as_ref().map(Session::user_id),
            subscribers = self.tx.receiver_count(),
            "session published"
        );
        self.tx.send_replace(session);
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHub")
            .field("current", &*self.tx.borrow())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

/// Receives session changes until dropped.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<Option<Session>>,
}

impl SessionSubscription {
    /// Wait for the next change and return the new session.
    ///
    /// Returns `None` once every hub handle has been dropped.
    pub async fn changed(&mut self) -> Option<Option<Session>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The latest session without waiting.
    #[must_use]
    pub fn borrow(&self) -> watch::Ref<'_, Option<Session>> {
        self.rx.borrow()
    }
}

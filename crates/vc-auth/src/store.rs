use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::{AuthOutcome, RiotAuthClient};
use crate::errors::{Result, RiotAuthError};
use crate::session::{Credentials, Session};

/// Trait for persisting the single session this client manages
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if any
    async fn load(&self) -> Option<Session>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> Result<()>;

    /// Forget the stored session
    async fn clear(&self) -> Result<()>;
}

/// In-memory session store for testing and simple use cases
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Option<Session> {
        self.session.read().ok()?.clone()
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self
            .session
            .write()
            .map_err(|_| RiotAuthError::Io(std::io::Error::other("session lock poisoned")))? =
            Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self
            .session
            .write()
            .map_err(|_| RiotAuthError::Io(std::io::Error::other("session lock poisoned")))? = None;
        Ok(())
    }
}

/// Bring back a persisted session if it may still be used.
///
/// Both the local freshness window and a live user-info check against the
/// provider must pass. On any failure the stored session is cleared and
/// `None` is returned, meaning the caller has to log in again.
pub async fn restore_session<S>(
    client: &RiotAuthClient,
    store: &S,
    now: DateTime<Utc>,
) -> Option<Session>
where
    S: SessionStore + ?Sized,
{
    let session = store.load().await?;

    if !session.is_fresh(now) {
        info!(
            saved_at = %session.acquired_at(),
            "Stored session is older than the freshness window, discarding"
        );
        discard(store).await;
        return None;
    }

    if let Err(e) = client.revalidate(&session).await {
        warn!("Stored session failed revalidation: {}", e);
        discard(store).await;
        return None;
    }

    info!("Reusing stored session");
    Some(session)
}

/// Run a full login and persist the session if one comes out of it.
///
/// The store is written only for [`AuthOutcome::Authenticated`]; a rejected
/// login or a multifactor challenge leaves it untouched.
pub async fn login_and_store<S>(
    client: &mut RiotAuthClient,
    store: &S,
    credentials: &Credentials,
) -> Result<AuthOutcome>
where
    S: SessionStore + ?Sized,
{
    let outcome = client.authorize(credentials).await?;
    store_if_authenticated(store, outcome).await
}

/// Finish a multifactor challenge and persist the resulting session
pub async fn complete_multifactor_and_store<S>(
    client: &mut RiotAuthClient,
    store: &S,
    code: &str,
) -> Result<AuthOutcome>
where
    S: SessionStore + ?Sized,
{
    let outcome = client.complete_multifactor(code).await?;
    store_if_authenticated(store, outcome).await
}

async fn store_if_authenticated<S>(store: &S, outcome: AuthOutcome) -> Result<AuthOutcome>
where
    S: SessionStore + ?Sized,
{
    if let AuthOutcome::Authenticated(session) = &outcome {
        store.save(session).await?;
        info!("Session saved");
    }
    Ok(outcome)
}

async fn discard<S: SessionStore + ?Sized>(store: &S) {
    if let Err(e) = store.clear().await {
        warn!("Failed to clear stored session: {}", e);
    }
}

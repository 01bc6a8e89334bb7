use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FlashcardSession, QuizSession};

/// Everything one user is doing right now.
#[derive(Serialize, Debug, Clone)]
pub struct SessionContext {
    pub quiz: QuizSession,
    pub flashcards: FlashcardSession,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl SessionContext {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            quiz: QuizSession::Idle,
            flashcards: FlashcardSession::Idle,
            created_at: now,
            last_active: now,
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Session id → context registry shared by all request handlers.
///
/// Transitions run synchronously under the write lock; nothing awaits while
/// holding it.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, SessionContext::new());
        tracing::debug!(session_id = %id, "Created session");
        id
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Removed session");
        }
        removed
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<SessionContext> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Runs `f` against the session and marks it active. Returns `None` when
    /// the session doesn't exist (never created, removed or expired).
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut SessionContext) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        let context = sessions.get_mut(&id)?;
        context.last_active = Utc::now();
        Some(f(context))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops sessions idle for longer than `ttl`, returning how many went.
    /// A `ttl` reaching past the earliest representable time keeps everything.
    pub async fn purge_idle(&self, ttl: chrono::Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return 0;
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, context| context.last_active > cutoff);
        before - sessions.len()
    }

    pub fn spawn_reaper(&self, ttl: chrono::Duration, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let purged = store.purge_idle(ttl).await;
                if purged > 0 {
                    tracing::info!("Expired {} idle sessions", purged);
                }
            }
        })
    }
}

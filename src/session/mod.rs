//! Session registry for concurrent game sessions
//!
//! The hosting bot runs many games at once, one per server. Each session owns
//! its own [`ClueEngine`]; nothing is shared between entries. Engines sit
//! behind a per-session mutex so overlapping triggers on the same session
//! run one after another and a reader never sees a half-applied generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::clues::{Assignment, ClueEngine, RevealSelection};
use crate::config::ClueConfig;

/// Engine handle shared between the registry and in-flight triggers
pub type SharedEngine = Arc<Mutex<ClueEngine>>;

/// Point-in-time copy of one session's clue state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub assignment: Option<Assignment>,
    pub reveals: Option<RevealSelection>,
    pub taken_at: DateTime<Utc>,
}

/// Map from session identifier to that session's engine
pub struct SessionRegistry {
    /// Deck configuration used for new sessions
    config: ClueConfig,

    /// Active sessions
    sessions: RwLock<HashMap<String, SharedEngine>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(config: ClueConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClueConfig {
        &self.config
    }

    /// Engine for a session, creating a fresh one on first use
    pub async fn get_or_create(&self, session_id: &str) -> SharedEngine {
        if let Some(engine) = self.sessions.read().await.get(session_id) {
            return Arc::clone(engine);
        }

        let mut sessions = self.sessions.write().await;
        let engine = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::info!(session_id, "Creating clue engine for new session");
            Arc::new(Mutex::new(ClueEngine::new(self.config.clone())))
        });
        Arc::clone(engine)
    }

    /// Engine for an existing session
    pub async fn get(&self, session_id: &str) -> Option<SharedEngine> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Clear a session's assignment and reveals (the bot's `wipe`)
    ///
    /// Returns `false` if the session does not exist.
    pub async fn reset(&self, session_id: &str) -> bool {
        let Some(engine) = self.get(session_id).await else {
            return false;
        };
        engine.lock().await.reset();
        tracing::info!(session_id, "Reset session clue state");
        true
    }

    /// Drop a session entirely
    pub async fn remove(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id, "Removed session");
        }
        removed
    }

    /// Copy out a session's current state
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let engine = self.get(session_id).await?;
        let engine = engine.lock().await;
        Some(SessionSnapshot {
            session_id: session_id.to_string(),
            assignment: engine.assignment().cloned(),
            reveals: engine.reveals().cloned(),
            taken_at: Utc::now(),
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Known session identifiers, sorted
    pub async fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(ClueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: [&str; 3] = ["alice", "bob", "charlie"];

    #[tokio::test]
    async fn test_get_or_create_reuses_engine() {
        let registry = SessionRegistry::default();

        let a = registry.get_or_create("guild-1").await;
        let b = registry.get_or_create("guild-1").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = SessionRegistry::default();

        let first = registry.get_or_create("guild-1").await;
        let _second = registry.get_or_create("guild-2").await;

        first.lock().await.assign(3, &ROSTER).unwrap();

        let second = registry.snapshot("guild-2").await.unwrap();
        assert!(second.assignment.is_none());
        let first = registry.snapshot("guild-1").await.unwrap();
        assert!(first.assignment.is_some());
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let registry = SessionRegistry::default();
        let engine = registry.get_or_create("guild-1").await;
        {
            let mut engine = engine.lock().await;
            engine.assign(3, &ROSTER).unwrap();
            engine.reshuffle_reveals();
        }

        assert!(registry.reset("guild-1").await);
        let snapshot = registry.snapshot("guild-1").await.unwrap();
        assert!(snapshot.assignment.is_none());
        assert!(snapshot.reveals.is_none());

        assert!(!registry.reset("missing").await);
    }

    #[tokio::test]
    async fn test_snapshot_json_roundtrip() {
        let registry = SessionRegistry::default();
        let engine = registry.get_or_create("guild-1").await;
        engine.lock().await.assign(3, &ROSTER).unwrap();

        let snapshot = registry.snapshot("guild-1").await.unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.session_id, "guild-1");
        assert_eq!(restored.assignment, snapshot.assignment);
        assert!(restored.reveals.is_none());
    }

    #[tokio::test]
    async fn test_remove_and_ids() {
        let registry = SessionRegistry::default();
        registry.get_or_create("b").await;
        registry.get_or_create("a").await;

        assert_eq!(registry.session_ids().await, vec!["a", "b"]);
        assert!(registry.remove("a").await);
        assert!(!registry.remove("a").await);
        assert!(registry.get("a").await.is_none());
        assert!(!registry.is_empty().await);
    }
}

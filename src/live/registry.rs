//! Session Registry
//!
//! Tracks live dashboard sessions and the channel used to push messages to
//! each of them. Every session owns its own parameter state; the registry
//! only does bookkeeping, capping and delivery.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// Configuration for the session registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum number of concurrent sessions
    pub max_sessions: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_sessions: 64 }
    }
}

/// Handle for pushing messages to one session
struct SessionHandle {
    sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Manages all live dashboard sessions
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    config: RegistryConfig,
}

impl SessionRegistry {
    /// Create a new registry
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new session.
    ///
    /// Returns the session ID on success, or an error if the session limit
    /// has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<SessionId, RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(RegistryError::TooManySessions(self.config.max_sessions));
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(id.clone(), SessionHandle { sender });

        tracing::info!(session_id = %id, "Dashboard session connected");
        Ok(id)
    }

    /// Unregister a session
    pub async fn unregister(&self, id: &str) {
        self.sessions.write().await.remove(id);
        tracing::info!(session_id = %id, "Dashboard session disconnected");
    }

    /// Send a message to a specific session
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), RegistryError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(id).ok_or(RegistryError::SessionNotFound)?;

        handle
            .sender
            .send(message)
            .map_err(|_| RegistryError::SendFailed)
    }

    /// Get the current session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Errors that can occur in the session registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Too many sessions (limit: {0})")]
    TooManySessions(usize),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_sessions, 64);
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let registry = SessionRegistry::new(RegistryConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = registry.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(registry.session_count().await, 1);

        registry.unregister(&id).await;
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let registry = SessionRegistry::new(RegistryConfig { max_sessions: 2 });

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        let id1 = registry.register(tx1).await.unwrap();
        let id2 = registry.register(tx2).await.unwrap();
        let result = registry.register(tx3).await;

        assert!(matches!(
            result,
            Err(RegistryError::TooManySessions(2))
        ));

        registry.unregister(&id1).await;
        registry.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_send_to_delivers() {
        let registry = SessionRegistry::new(RegistryConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let id = registry.register(tx).await.unwrap();
        registry.send_to(&id, ServerMessage::Pong).await.unwrap();

        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Pong)));

        registry.unregister(&id).await;
    }

    #[tokio::test]
    async fn test_send_to_unknown_session() {
        let registry = SessionRegistry::new(RegistryConfig::default());
        let result = registry.send_to("missing", ServerMessage::Pong).await;
        assert!(matches!(result, Err(RegistryError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_slot_frees_after_unregister() {
        let registry = SessionRegistry::new(RegistryConfig { max_sessions: 1 });

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let id1 = registry.register(tx1).await.unwrap();
        registry.unregister(&id1).await;

        let (tx2, _rx2) = mpsc::unbounded_channel();
        assert!(registry.register(tx2).await.is_ok());
    }
}

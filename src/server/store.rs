use crate::{Error, Result, config::LlmConfig, llm::LlmClient, stylist::Stylist};
use chrono::{DateTime, Duration, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

struct SessionEntry {
    stylist: Arc<Stylist>,
    last_seen: DateTime<Utc>,
}

/// Live sessions, one [`Stylist`] each. Nothing is persisted; sessions idle
/// for longer than `idle_timeout` are dropped whenever a new one is created.
pub struct SessionStore {
    client: Arc<dyn LlmClient>,
    config: LlmConfig,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(client: Arc<dyn LlmClient>, config: LlmConfig, idle_timeout: Duration) -> Self {
        Self {
            client,
            config,
            idle_timeout,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> (Uuid, Arc<Stylist>) {
        self.create_at(Utc::now()).await
    }

    pub(crate) async fn create_at(&self, now: DateTime<Utc>) -> (Uuid, Arc<Stylist>) {
        let session_id = Uuid::new_v4();
        let stylist = Arc::new(Stylist::new(self.client.clone(), &self.config));

        let mut sessions = self.sessions.write().await;

        // Sweep idle sessions before adding a new one
        let before = sessions.len();
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| now - entry.last_seen <= idle_timeout);
        if sessions.len() < before {
            debug!("Expired {} idle sessions", before - sessions.len());
        }

        sessions.insert(
            session_id,
            SessionEntry {
                stylist: stylist.clone(),
                last_seen: now,
            },
        );
        info!("Created session {} ({} live)", session_id, sessions.len());
        (session_id, stylist)
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, session_id: Uuid) -> Result<Arc<Stylist>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(entry) => {
                entry.last_seen = Utc::now();
                Ok(entry.stylist.clone())
            }
            None => Err(Error::SessionNotFound {
                session_id: session_id.to_string(),
            }),
        }
    }

    pub async fn remove(&self, session_id: Uuid) -> Result<()> {
        match self.sessions.write().await.remove(&session_id) {
            Some(_) => {
                info!("Removed session {}", session_id);
                Ok(())
            }
            None => Err(Error::SessionNotFound {
                session_id: session_id.to_string(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

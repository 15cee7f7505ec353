//! In-memory implementation of [`GameStateRepository`].

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GameState;
use crate::domain::ports::GameStateRepository;

/// Holds the state document in memory. Used by tests and embedders that
/// do not want a file in the working tree.
#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    state: Mutex<Option<GameState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Copy of the stored document, if anything was saved.
    pub async fn snapshot(&self) -> Option<GameState> {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl GameStateRepository for InMemoryStateRepository {
    async fn load(&self) -> DomainResult<GameState> {
        Ok(self.state.lock().await.clone().unwrap_or_default())
    }

    async fn save(&self, state: &mut GameState) -> DomainResult<()> {
        let mut stored = self.state.lock().await;
        let stored_revision = stored.as_ref().map_or(0, |s| s.revision);
        if stored_revision != state.revision {
            return Err(DomainError::ConcurrencyConflict {
                entity: "game state".to_string(),
                id: "memory".to_string(),
            });
        }

        state.revision += 1;
        state.player.last_played = Utc::now();
        *stored = Some(state.clone());
        Ok(())
    }
}

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::GameState;

/// Repository port for the persisted game state document.
///
/// The document is read and written whole. Implementations substitute a
/// fresh default when nothing usable is stored.
#[async_trait]
pub trait GameStateRepository: Send + Sync {
    /// Load the current state, or a default one if none is stored.
    async fn load(&self) -> DomainResult<GameState>;

    /// Replace the stored document with `state`.
    ///
    /// Fails with `ConcurrencyConflict` if the stored revision no longer
    /// matches `state.revision`. On success `state.revision` is advanced and
    /// `state.player.last_played` refreshed.
    async fn save(&self, state: &mut GameState) -> DomainResult<()>;
}

//! JSON document implementation of [`GameStateRepository`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GameState;
use crate::domain::ports::GameStateRepository;

/// Stores the game state as one pretty-printed JSON file in the project root.
#[derive(Debug, Clone)]
pub struct JsonStateRepository {
    path: PathBuf,
}

impl JsonStateRepository {
    pub fn new(root: impl AsRef<Path>, state_file: &str) -> Self {
        Self {
            path: root.as_ref().join(state_file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Revision currently on disk, or 0 if there is no usable document.
    async fn stored_revision(&self) -> DomainResult<u64> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice::<GameState>(&bytes)
                .map(|s| s.revision)
                .unwrap_or(0)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Move an unreadable document aside so it is not lost on the next save.
    ///
    /// Backups are named `<file>.corrupt-<UTC timestamp>`; an existing backup
    /// is never overwritten.
    async fn back_up_corrupt(&self) -> DomainResult<PathBuf> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
        let mut base = self.path.clone().into_os_string();
        base.push(format!(".corrupt-{timestamp}"));

        let mut backup = PathBuf::from(&base);
        let mut attempt = 1;
        while fs::try_exists(&backup).await? {
            let mut candidate = base.clone();
            candidate.push(format!("-{attempt}"));
            backup = PathBuf::from(candidate);
            attempt += 1;
        }

        fs::rename(&self.path, &backup).await?;
        Ok(backup)
    }

    async fn write_atomic(&self, contents: &[u8]) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl GameStateRepository for JsonStateRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> DomainResult<GameState> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no state document, starting fresh");
                return Ok(GameState::default());
            }
            Err(e) => return Err(e.into()),
        };

        // Invalid UTF-8 is a parse error here, so it takes the recovery path too
        match serde_json::from_slice::<GameState>(&bytes) {
            Ok(state) => Ok(state),
            Err(parse_error) => {
                match self.back_up_corrupt().await {
                    Ok(backup) => warn!(
                        error = %parse_error,
                        backup = %backup.display(),
                        "state document is corrupt; backed it up and starting fresh"
                    ),
                    Err(backup_error) => warn!(
                        error = %parse_error,
                        backup_error = %backup_error,
                        "state document is corrupt and could not be backed up; starting fresh"
                    ),
                }
                Ok(GameState::default())
            }
        }
    }

    #[instrument(skip(self, state), fields(path = %self.path.display(), revision = state.revision))]
    async fn save(&self, state: &mut GameState) -> DomainResult<()> {
        let stored = self.stored_revision().await?;
        if stored != state.revision {
            warn!(stored, loaded = state.revision, "state changed since it was loaded");
            return Err(DomainError::ConcurrencyConflict {
                entity: "game state".to_string(),
                id: self.path.display().to_string(),
            });
        }

        let mut next = state.clone();
        next.revision += 1;
        next.player.last_played = Utc::now();

        let json = serde_json::to_vec_pretty(&next)?;
        self.write_atomic(&json).await?;

        *state = next;
        info!(revision = state.revision, "saved game state");
        Ok(())
    }
}

// Leaderboard store: durable rows plus an in-memory copy of the latest
// result per username.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, LeaderboardEntry};
use crate::game::Player;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct Leaderboard {
    db: Arc<Database>,
    scores: Mutex<HashMap<String, Player>>,
}

impl Leaderboard {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            scores: Mutex::new(HashMap::new()),
        }
    }

    /// Record a finished match. Later results for a username replace
    /// earlier ones, they do not add up.
    ///
    /// The whole batch runs under one lock and one transaction; the
    /// in-memory copy is only touched once the transaction commits.
    pub async fn update(&self, results: &[Player]) -> Result<(), StoreError> {
        let mut scores = self.scores.lock().await;

        self.db.upsert_players(results).await?;

        for p in results {
            scores.insert(p.username.clone(), p.clone());
        }
        tracing::info!(players = results.len(), "leaderboard updated");
        Ok(())
    }

    /// Every durable entry, highest score first.
    pub async fn fetch_all(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.db.fetch_leaderboard().await?)
    }

    /// Latest in-memory result for a username.
    #[cfg(test)]
    pub(crate) async fn cached(&self, username: &str) -> Option<Player> {
        self.scores.lock().await.get(username).cloned()
    }
}

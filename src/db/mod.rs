// Database access layer (Postgres or SQLite via sqlx's Any driver).

use serde::{Deserialize, Serialize};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::game::Player;

/// A durable leaderboard row. Missing ages read back as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    pub age: i64,
    pub score: i64,
}

pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leaderboard (
                username TEXT PRIMARY KEY,
                age BIGINT,
                score BIGINT NOT NULL DEFAULT 0
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or overwrite every player in one transaction.
    ///
    /// Either all rows land or none do.
    pub async fn upsert_players(&self, players: &[Player]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for p in players {
            sqlx::query(
                "INSERT INTO leaderboard (username, age, score) VALUES ($1, $2, $3) \
                 ON CONFLICT (username) DO UPDATE SET score = excluded.score, age = excluded.age",
            )
            .bind(p.username.as_str())
            .bind(p.age)
            .bind(p.score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// All rows, highest score first. Ties are ordered by username.
    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT username, COALESCE(age, 0) AS age, score FROM leaderboard ORDER BY score DESC, username ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    #[cfg(test)]
    pub(crate) async fn execute_raw(&self, sql: &str) -> Result<(), sqlx::Error> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::connect("sqlite::memory:", 1).await.unwrap()
    }

    fn scored(name: &str, age: i64, score: i64) -> Player {
        Player {
            username: name.to_string(),
            age,
            score,
        }
    }

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let db = test_db().await;
        let rows = db.fetch_leaderboard().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_and_fetch_ordered() {
        let db = test_db().await;
        db.upsert_players(&[
            scored("Alice", 30, 12),
            scored("Bob", 22, 45),
            scored("Carol", 51, 27),
        ])
        .await
        .unwrap();

        let rows = db.fetch_leaderboard().await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
        assert_eq!(rows[0].age, 22);
        assert_eq!(rows[0].score, 45);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_row() {
        let db = test_db().await;
        db.upsert_players(&[scored("Alice", 30, 90)]).await.unwrap();
        db.upsert_players(&[scored("Alice", 31, 3)]).await.unwrap();

        let rows = db.fetch_leaderboard().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            LeaderboardEntry {
                username: "Alice".into(),
                age: 31,
                score: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_null_age_reads_as_zero() {
        let db = test_db().await;
        db.execute_raw("INSERT INTO leaderboard (username, age, score) VALUES ('ghost', NULL, 6)")
            .await
            .unwrap();

        let rows = db.fetch_leaderboard().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].age, 0);
        assert_eq!(rows[0].score, 6);
    }

    #[tokio::test]
    async fn test_failed_batch_writes_nothing() {
        let db = test_db().await;
        db.execute_raw(
            "CREATE TRIGGER reject_mallory BEFORE INSERT ON leaderboard \
             WHEN NEW.username = 'mallory' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .await
        .unwrap();

        let result = db
            .upsert_players(&[scored("Alice", 30, 9), scored("mallory", 40, 3)])
            .await;
        assert!(result.is_err());

        let rows = db.fetch_leaderboard().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_after_close_fails() {
        let db = test_db().await;
        db.close().await;
        assert!(db.fetch_leaderboard().await.is_err());
    }
}

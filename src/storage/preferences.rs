use super::schema::Database;
use super::types::DatabaseError;

impl Database {
    // ========================================================================
    // User Preferences Operations
    // ========================================================================

    /// Get a single preference value by key, or `None` if it was never set.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a preference value (UPSERT), refreshing its timestamp.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove every stored preference. Returns the number of rows deleted.
    pub async fn clear_preferences(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM user_preferences")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_preference_missing() {
        let db = test_db().await;
        assert_eq!(db.get_preference("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_preference_upsert() {
        let db = test_db().await;
        db.set_preference("theme", "dark").await.unwrap();
        db.set_preference("theme", "light").await.unwrap();

        assert_eq!(
            db.get_preference("theme").await.unwrap(),
            Some("light".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_preference_records_timestamp() {
        let db = test_db().await;
        db.set_preference("theme", "dark").await.unwrap();

        let (updated_at,): (String,) =
            sqlx::query_as("SELECT updated_at FROM user_preferences WHERE key = ?")
                .bind("theme")
                .fetch_one(&db.pool)
                .await
                .unwrap();
        assert!(!updated_at.is_empty());
    }

    #[tokio::test]
    async fn test_clear_preferences() {
        let db = test_db().await;
        db.set_preference("theme", "dark").await.unwrap();

        assert_eq!(db.clear_preferences().await.unwrap(), 1);
        assert_eq!(db.get_preference("theme").await.unwrap(), None);
        assert_eq!(db.clear_preferences().await.unwrap(), 0);
    }
}

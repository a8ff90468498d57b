use chrono::NaiveDateTime;
use sqlx::{
    migrate::MigrateDatabase, query, query_as, sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite,
};

pub const DEFAULT_DB_URL: &str = "sqlite://wortionary.db";

#[derive(Debug, Clone, FromRow)]
pub struct HistoryEntry {
    pub uid: i64,
    pub query: String,
    pub results_count: i64,
    pub searched_at: NaiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct SavedWord {
    pub uid: i64,
    pub word: String,
    pub definition: String,
    pub notes: Option<String>,
    pub saved_at: NaiveDateTime,
}

/// SQLite-backed local storage: a string key/value table plus search
/// history and saved words.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn connect(url: &str) -> sqlx::Result<Self> {
        let in_memory = url.contains(":memory:");
        if !in_memory && !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let mut options = SqlitePoolOptions::new();
        if in_memory {
            // every connection to :memory: is its own database
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect(url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    #[cfg(test)]
    pub async fn in_memory() -> sqlx::Result<Self> {
        Self::connect("sqlite::memory:").await
    }
}

impl Storage {
    pub async fn get_item(&self, key: &str) -> sqlx::Result<Option<String>> {
        let row: Option<(String,)> = query_as("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> sqlx::Result<()> {
        query(
            "INSERT INTO local_storage(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }

    /// Removes a key, returns true if it was present
    pub async fn remove_item(&self, key: &str) -> sqlx::Result<bool> {
        let result = query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Storage {
    pub async fn add_history(&self, search: &str, results_count: usize) -> sqlx::Result<()> {
        query("INSERT INTO search_history(query, results_count) VALUES(?, ?)")
            .bind(search)
            .bind(results_count as i64)
            .execute(&self.pool)
            .await
            .map(|_| ())
    }

    /// Most recent searches first
    pub async fn recent_history(&self, limit: u32) -> sqlx::Result<Vec<HistoryEntry>> {
        query_as("SELECT * FROM search_history ORDER BY uid DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Returns how many entries were removed
    pub async fn clear_history(&self) -> sqlx::Result<u64> {
        let result = query("DELETE FROM search_history").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

impl Storage {
    /// Saves a word, returns false if it was already saved
    pub async fn save_word(
        &self,
        word: &str,
        definition: &str,
        notes: Option<&str>,
    ) -> sqlx::Result<bool> {
        let result = query(
            "INSERT INTO saved_words(word, definition, notes) VALUES(?, ?, ?)
             ON CONFLICT(word) DO NOTHING",
        )
        .bind(word)
        .bind(definition)
        .bind(notes)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attempt to remove a word, returns true if the word was removed
    pub async fn remove_word(&self, word: &str) -> sqlx::Result<bool> {
        let result = query("DELETE FROM saved_words WHERE word = ?")
            .bind(word)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_word(&self, word: &str) -> sqlx::Result<Option<SavedWord>> {
        query_as("SELECT * FROM saved_words WHERE word = ?")
            .bind(word)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn saved_words(&self) -> sqlx::Result<Vec<SavedWord>> {
        query_as("SELECT * FROM saved_words ORDER BY saved_at DESC, uid DESC")
            .fetch_all(&self.pool)
            .await
    }
}

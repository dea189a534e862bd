//! Connection and schema setup. Form CRUD lives in `forms`.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Handle to the form store, `~/.local/state/formsync/forms.db` by default.
#[derive(Clone)]
pub struct FormStore {
    pub(crate) pool: Pool<Sqlite>,
}

impl FormStore {
    /// Open (or create) the default store and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("formsync")?;
        let db_path = xdg_dirs.place_state_file("forms.db")?;
        Self::open_at(&db_path).await
    }

    /// Open (or create) the store at `path`. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let store = FormStore { pool };
        store.migrate().await?;
        tracing::debug!("opened form store at {}", path.display());
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS forms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                form_id TEXT NOT NULL,
                version TEXT,
                name TEXT NOT NULL,
                hash TEXT NOT NULL,
                form_path TEXT NOT NULL,
                media_dir TEXT,
                downloaded_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS forms_form_id ON forms (form_id);")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// In-memory store for tests.
pub(crate) async fn open_memory() -> Result<FormStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = FormStore { pool };
    store.migrate().await?;
    Ok(store)
}

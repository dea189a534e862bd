//! Form record reads and writes.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::path::PathBuf;

use super::db::{unix_timestamp, FormStore};
use super::types::{FormRecord, FormStatus, StoredForm, StoredFormId};
use crate::form_list::{FormHash, FormListEntry};

fn row_to_form(row: &SqliteRow) -> StoredForm {
    let form_path: String = row.get("form_path");
    let media_dir: Option<String> = row.get("media_dir");
    StoredForm {
        id: row.get("id"),
        form_id: row.get("form_id"),
        version: row.get("version"),
        name: row.get("name"),
        hash: row.get("hash"),
        form_path: PathBuf::from(form_path),
        media_dir: media_dir.map(PathBuf::from),
        downloaded_at: row.get("downloaded_at"),
    }
}

const COLUMNS: &str = "id, form_id, version, name, hash, form_path, media_dir, downloaded_at";

impl FormStore {
    /// Insert a downloaded form and return its row id.
    pub async fn record_form(&self, form: &FormRecord) -> Result<StoredFormId> {
        let id = sqlx::query(
            r#"
            INSERT INTO forms (form_id, version, name, hash, form_path, media_dir, downloaded_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&form.form_id)
        .bind(&form.version)
        .bind(&form.name)
        .bind(&form.hash)
        .bind(form.form_path.to_string_lossy().into_owned())
        .bind(
            form.media_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        tracing::debug!(form_id = %form.form_id, id, "recorded form");
        Ok(id)
    }

    /// Most recently downloaded copy of `form_id`.
    pub async fn latest_form(&self, form_id: &str) -> Result<Option<StoredForm>> {
        let sql = format!(
            "SELECT {} FROM forms WHERE form_id = ?1 ORDER BY downloaded_at DESC, id DESC LIMIT 1",
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(form_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_form))
    }

    pub async fn get_form(&self, id: StoredFormId) -> Result<Option<StoredForm>> {
        let sql = format!("SELECT {} FROM forms WHERE id = ?1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_form))
    }

    /// All stored forms, newest first.
    pub async fn list_forms(&self) -> Result<Vec<StoredForm>> {
        let sql = format!(
            "SELECT {} FROM forms ORDER BY downloaded_at DESC, id DESC",
            COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_form).collect())
    }

    /// Delete a record. Returns false if no such id.
    pub async fn remove_form(&self, id: StoredFormId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Compare a server entry to the latest stored copy of the same form id.
    pub async fn form_status(&self, entry: &FormListEntry) -> Result<FormStatus> {
        let Some(hash) = entry.hash.as_deref().and_then(FormHash::parse) else {
            return Ok(FormStatus::MissingHash);
        };
        let status = match self.latest_form(&entry.form_id).await? {
            None => FormStatus::New,
            Some(stored) if stored.hash == hash.to_string() => FormStatus::UpToDate,
            Some(_) => FormStatus::UpdateAvailable,
        };
        Ok(status)
    }
}

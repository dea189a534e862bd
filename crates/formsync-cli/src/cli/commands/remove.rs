//! `formsync remove` – forget a downloaded form, optionally deleting its files.

use anyhow::{Context, Result};
use formsync_core::store::FormStore;

pub async fn run_remove(store: &FormStore, id: i64, delete_files: bool) -> Result<()> {
    let form = store
        .get_form(id)
        .await?
        .with_context(|| format!("no stored form with id {}", id))?;

    if delete_files {
        if form.form_path.exists() {
            tokio::fs::remove_file(&form.form_path)
                .await
                .with_context(|| format!("delete {}", form.form_path.display()))?;
        }
        if let Some(dir) = form.media_dir.as_ref().filter(|d| d.exists()) {
            tokio::fs::remove_dir_all(dir)
                .await
                .with_context(|| format!("delete {}", dir.display()))?;
        }
    }

    store.remove_form(id).await?;
    tracing::info!(id, form_id = %form.form_id, delete_files, "removed form");
    println!("Removed {} ({}).", form.form_id, form.form_path.display());
    Ok(())
}

//! `formsync forms` – list downloaded forms.

use anyhow::Result;
use formsync_core::store::FormStore;

pub async fn run_forms(store: &FormStore) -> Result<()> {
    let forms = store.list_forms().await?;
    if forms.is_empty() {
        println!("No forms downloaded.");
        return Ok(());
    }
    println!("{:<6} {:<24} {:<10} {}", "ID", "FORM ID", "VERSION", "PATH");
    for f in forms {
        println!(
            "{:<6} {:<24} {:<10} {}",
            f.id,
            f.form_id,
            f.version.as_deref().unwrap_or("-"),
            f.form_path.display()
        );
    }
    Ok(())
}

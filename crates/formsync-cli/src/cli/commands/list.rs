//! `formsync list` – show the server's form list.

use anyhow::Result;
use formsync_core::config::FormsyncConfig;
use formsync_core::store::FormStore;

use super::fetch_form_list;

pub async fn run_list(
    cfg: &FormsyncConfig,
    store: &FormStore,
    server: Option<&str>,
    json: bool,
) -> Result<()> {
    let (_, entries) = fetch_form_list(cfg, server).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("The server has no forms.");
        return Ok(());
    }

    println!("{:<24} {:<10} {:<17} {}", "FORM ID", "VERSION", "STATUS", "NAME");
    for entry in &entries {
        let status = store.form_status(entry).await?;
        println!(
            "{:<24} {:<10} {:<17} {}",
            entry.form_id,
            entry.version.as_deref().unwrap_or("-"),
            status.as_str(),
            entry.display_name()
        );
    }
    Ok(())
}

//! CLI command handlers, one file per command.

mod checksum;
mod forms;
mod get;
mod list;
mod remove;

pub use checksum::run_checksum;
pub use forms::run_forms;
pub use get::{run_get, GetArgs};
pub use list::run_list;
pub use remove::run_remove;

use anyhow::{Context, Result};
use formsync_core::config::FormsyncConfig;
use formsync_core::form_list::FormListEntry;
use formsync_core::openrosa::ServerClient;

/// Fetch the form list off the async runtime.
pub(crate) async fn fetch_form_list(
    cfg: &FormsyncConfig,
    server: Option<&str>,
) -> Result<(ServerClient, Vec<FormListEntry>)> {
    let client = ServerClient::from_config(cfg, server)?;
    let entries = tokio::task::spawn_blocking({
        let client = client.clone();
        move || client.fetch_form_list()
    })
    .await
    .context("form list task join")?
    .with_context(|| format!("fetching form list from {}", client.form_list_url()))?;
    Ok((client, entries))
}

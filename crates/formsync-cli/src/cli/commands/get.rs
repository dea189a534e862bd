//! `formsync get` – download selected forms and report the outcome.

use anyhow::{Context, Result};
use formsync_core::config::FormsyncConfig;
use formsync_core::download;
use formsync_core::store::FormStore;
use std::path::PathBuf;

use super::fetch_form_list;

#[derive(Debug)]
pub struct GetArgs {
    pub form_ids: Vec<String>,
    pub all: bool,
    pub server: Option<String>,
    pub forms_dir: Option<PathBuf>,
    pub details: bool,
}

/// Returns exit code 1 when any download failed.
pub async fn run_get(cfg: &FormsyncConfig, store: &FormStore, args: GetArgs) -> Result<i32> {
    let forms_dir = match args.forms_dir {
        Some(dir) => dir,
        None => cfg.resolved_forms_dir()?,
    };
    tokio::fs::create_dir_all(&forms_dir)
        .await
        .with_context(|| format!("create {}", forms_dir.display()))?;

    let (client, entries) = fetch_form_list(cfg, args.server.as_deref()).await?;
    let (selected, missing) = download::select_entries(entries, &args.form_ids, args.all);
    if !missing.is_empty() {
        anyhow::bail!("not on the server: {}", missing.join(", "));
    }
    if selected.is_empty() {
        println!("The server has no forms.");
        return Ok(0);
    }

    let report = download::download_forms(&client, store, selected, &forms_dir).await;
    println!("{}", report.summary());

    if args.details {
        for outcome in report.outcomes() {
            if let Ok(done) = &outcome.result {
                let note = if done.already_present {
                    " (already up to date)"
                } else {
                    ""
                };
                println!(
                    "{}: {}{}",
                    outcome.entry.display_name(),
                    done.form_path.display(),
                    note
                );
            }
        }
    }
    if report.has_failures() {
        println!();
        println!("{}", report.details());
        return Ok(1);
    }
    Ok(0)
}

//! Download pipeline: validate entries, fetch each form, record it.
//!
//! Each entry succeeds or fails on its own; the outcome of the whole batch is
//! a [`DownloadReport`].

mod error;
mod form;

use std::path::Path;

use crate::form_list::FormListEntry;
use crate::openrosa::ServerClient;
use crate::report::{DownloadReport, DownloadedForm};
use crate::store::{FormRecord, FormStore};
use crate::validate::{self, DownloadableForm, EntryCheck};

pub use error::FormDownloadError;

/// Pick the entries to download: all of them, or those whose form id is in `ids`.
///
/// Ids not on the server come back as errors alongside the selection.
pub fn select_entries(
    entries: Vec<FormListEntry>,
    ids: &[String],
    all: bool,
) -> (Vec<FormListEntry>, Vec<String>) {
    if all {
        return (entries, Vec::new());
    }
    let missing = ids
        .iter()
        .filter(|id| !entries.iter().any(|e| &e.form_id == *id))
        .cloned()
        .collect();
    let selected = entries
        .into_iter()
        .filter(|e| ids.contains(&e.form_id))
        .collect();
    (selected, missing)
}

/// Download every entry into `forms_dir` and record successes in `store`.
pub async fn download_forms(
    client: &ServerClient,
    store: &FormStore,
    entries: Vec<FormListEntry>,
    forms_dir: &Path,
) -> DownloadReport {
    let mut report = DownloadReport::default();
    for check in validate::validate_entries(entries) {
        match check {
            EntryCheck::Invalid { entry, error } => {
                report.push_failure(entry, error.into());
            }
            EntryCheck::Downloadable(form) => {
                let entry = form.entry.clone();
                match download_one(client, store, form, forms_dir).await {
                    Ok(done) => {
                        tracing::info!(
                            form_id = %entry.form_id,
                            path = %done.form_path.display(),
                            already_present = done.already_present,
                            "form downloaded"
                        );
                        report.push_success(entry, done);
                    }
                    Err(e) => {
                        tracing::warn!(
                            form_id = %entry.form_id,
                            permanent = e.is_permanent(),
                            "form download failed: {}",
                            e
                        );
                        report.push_failure(entry, e);
                    }
                }
            }
        }
    }
    tracing::info!(
        total = report.total(),
        failed = report.failed(),
        "download batch finished"
    );
    report
}

async fn download_one(
    client: &ServerClient,
    store: &FormStore,
    form: DownloadableForm,
    forms_dir: &Path,
) -> Result<DownloadedForm, FormDownloadError> {
    let hash = form.hash.to_string();

    let existing = store
        .latest_form(&form.entry.form_id)
        .await
        .map_err(FormDownloadError::Store)?;
    if let Some(stored) = existing {
        if stored.hash == hash && stored.form_path.exists() {
            return Ok(DownloadedForm {
                store_id: stored.id,
                form_path: stored.form_path,
                media_dir: stored.media_dir,
                media_files: 0,
                already_present: true,
            });
        }
    }

    let fetched = tokio::task::spawn_blocking({
        let client = client.clone();
        let forms_dir = forms_dir.to_path_buf();
        let form = form.clone();
        move || form::fetch_form(&client, &form, &forms_dir)
    })
    .await
    .map_err(|e| FormDownloadError::Task(e.to_string()))??;

    let record = FormRecord {
        form_id: form.entry.form_id.clone(),
        version: form.entry.version.clone(),
        name: form.entry.name.clone(),
        hash,
        form_path: fetched.form_path.clone(),
        media_dir: fetched.media_dir.clone(),
    };
    let store_id = store
        .record_form(&record)
        .await
        .map_err(FormDownloadError::Store)?;

    Ok(DownloadedForm {
        store_id,
        form_path: fetched.form_path,
        media_dir: fetched.media_dir,
        media_files: fetched.media_files,
        already_present: false,
    })
}

//! Outcome of a download batch and the text shown for it.

use std::path::PathBuf;

use crate::download::FormDownloadError;
use crate::form_list::FormListEntry;
use crate::messages;
use crate::store::StoredFormId;

/// Where a successfully downloaded form ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedForm {
    pub store_id: StoredFormId,
    pub form_path: PathBuf,
    pub media_dir: Option<PathBuf>,
    pub media_files: usize,
    /// True when the same form and hash were already stored, so nothing was fetched.
    pub already_present: bool,
}

#[derive(Debug)]
pub struct FormOutcome {
    pub entry: FormListEntry,
    pub result: Result<DownloadedForm, FormDownloadError>,
}

/// One line of the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    pub form_name: String,
    pub form_id: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    outcomes: Vec<FormOutcome>,
}

impl DownloadReport {
    pub fn push_success(&mut self, entry: FormListEntry, form: DownloadedForm) {
        self.outcomes.push(FormOutcome {
            entry,
            result: Ok(form),
        });
    }

    pub fn push_failure(&mut self, entry: FormListEntry, error: FormDownloadError) {
        self.outcomes.push(FormOutcome {
            entry,
            result: Err(error),
        });
    }

    pub fn outcomes(&self) -> &[FormOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// `"All downloads succeeded!"` or `"N of M downloads failed!"`.
    pub fn summary(&self) -> String {
        match self.failed() {
            0 => messages::ALL_DOWNLOADS_SUCCEEDED.to_string(),
            n => messages::downloads_failed(n, self.total()),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = FailureDetail> + '_ {
        self.outcomes.iter().filter_map(|o| {
            let err = o.result.as_ref().err()?;
            Some(FailureDetail {
                form_name: o.entry.display_name().to_string(),
                form_id: o.entry.form_id.clone(),
                message: err.user_message(),
            })
        })
    }

    /// Details view: one block per failed form.
    pub fn details(&self) -> String {
        self.failures()
            .map(|f| {
                if f.form_id.is_empty() || f.form_id == f.form_name {
                    format!("{}\n  {}", f.form_name, f.message)
                } else {
                    format!("{} ({})\n  {}", f.form_name, f.form_id, f.message)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

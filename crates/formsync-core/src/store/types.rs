use serde::Serialize;
use std::path::PathBuf;

pub type StoredFormId = i64;

/// A form that has been downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredForm {
    pub id: StoredFormId,
    pub form_id: String,
    pub version: Option<String>,
    pub name: String,
    /// Hash as published by the server, e.g. `md5:...`.
    pub hash: String,
    pub form_path: PathBuf,
    pub media_dir: Option<PathBuf>,
    /// Unix seconds.
    pub downloaded_at: i64,
}

/// Fields written when a download completes.
#[derive(Debug, Clone)]
pub struct FormRecord {
    pub form_id: String,
    pub version: Option<String>,
    pub name: String,
    pub hash: String,
    pub form_path: PathBuf,
    pub media_dir: Option<PathBuf>,
}

/// How a server form list entry relates to what is stored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormStatus {
    New,
    UpToDate,
    UpdateAvailable,
    MissingHash,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::New => "new",
            FormStatus::UpToDate => "up-to-date",
            FormStatus::UpdateAvailable => "update-available",
            FormStatus::MissingHash => "missing-hash",
        }
    }
}

//! Form list hash validation.
//!
//! Hash presence is the only thing checked here: an entry with a hash is
//! downloadable whatever else it is missing, an entry without one is a
//! permanent per-entry failure.

use serde::Serialize;
use thiserror::Error;

use crate::form_list::{FormHash, FormListEntry};
use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The server omitted `<hash>` (or sent it empty).
    #[error("form list entry has no hash")]
    MissingHash,
}

impl ValidationError {
    /// Text for the failure details view.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingHash => messages::form_with_no_hash_detail(),
        }
    }
}

/// An entry that passed validation, with its parsed hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadableForm {
    pub entry: FormListEntry,
    pub hash: FormHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCheck {
    Downloadable(DownloadableForm),
    Invalid {
        entry: FormListEntry,
        error: ValidationError,
    },
}

impl EntryCheck {
    pub fn entry(&self) -> &FormListEntry {
        match self {
            EntryCheck::Downloadable(form) => &form.entry,
            EntryCheck::Invalid { entry, .. } => entry,
        }
    }

    pub fn is_downloadable(&self) -> bool {
        matches!(self, EntryCheck::Downloadable(_))
    }
}

/// Classify a single entry.
pub fn validate_entry(entry: FormListEntry) -> EntryCheck {
    match entry.hash.as_deref().and_then(FormHash::parse) {
        Some(hash) => EntryCheck::Downloadable(DownloadableForm { entry, hash }),
        None => {
            tracing::warn!(
                form_id = %entry.form_id,
                "form list entry has no hash; marking as failed"
            );
            EntryCheck::Invalid {
                entry,
                error: ValidationError::MissingHash,
            }
        }
    }
}

/// Classify every entry, keeping input order. Never fails as a whole.
pub fn validate_entries<I>(entries: I) -> Vec<EntryCheck>
where
    I: IntoIterator<Item = FormListEntry>,
{
    entries.into_iter().map(validate_entry).collect()
}

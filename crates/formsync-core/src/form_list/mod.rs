//! OpenRosa form list (`GET /formList`) model and parser.
//!
//! Each `<xform>` element becomes a [`FormListEntry`]. Child elements are all
//! optional at parse time; deciding whether an entry can be downloaded is the
//! job of [`crate::validate`].

mod error;
mod hash;
mod parse;

use serde::Serialize;

pub use error::FormListError;
pub use hash::FormHash;
pub use parse::parse_form_list;
pub(crate) use parse::{child_text, is_named};

/// One `<xform>` entry from a server form list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormListEntry {
    /// `<formID>`; empty if the server left it out.
    pub form_id: String,
    /// `<name>`; empty if the server left it out.
    pub name: String,
    pub version: Option<String>,
    /// Raw `<hash>` text, e.g. `md5:0cc175b9c0f1b6a831c399e269772661`.
    pub hash: Option<String>,
    pub download_url: Option<String>,
    pub manifest_url: Option<String>,
    pub description: Option<String>,
}

impl FormListEntry {
    /// Name to show the user: the form name, else its id.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.form_id.is_empty() {
            &self.form_id
        } else {
            "(unnamed form)"
        }
    }
}

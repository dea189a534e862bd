//! Persistent record of downloaded forms (SQLite via sqlx).
//!
//! Lets the client tell whether a form on the server is new, unchanged, or
//! has an update, and skip re-downloading forms it already has.

mod db;
mod forms;
mod types;

pub use db::FormStore;
pub use types::{FormRecord, FormStatus, StoredForm, StoredFormId};

#[cfg(test)]
pub(crate) use db::open_memory;

#[cfg(test)]
mod tests;

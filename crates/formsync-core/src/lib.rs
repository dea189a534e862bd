pub mod config;
pub mod logging;

pub mod checksum;
pub mod download;
pub mod form_list;
pub mod manifest;
pub mod messages;
pub mod naming;
pub mod openrosa;
pub mod report;
pub mod retry;
pub mod store;
pub mod validate;

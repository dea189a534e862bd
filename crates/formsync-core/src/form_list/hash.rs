//! Typed view of the `<hash>` value carried by form lists and manifests.

use serde::Serialize;
use std::fmt;

const MD5_PREFIX: &str = "md5:";

/// A content hash as published by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "algorithm", content = "value", rename_all = "lowercase")]
pub enum FormHash {
    /// `md5:<32 hex>`; stored lowercase.
    Md5(String),
    /// Anything else: kept verbatim, not verifiable.
    Opaque(String),
}

impl FormHash {
    /// Parse a raw `<hash>` value. Empty or whitespace-only input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let digest = raw
            .get(..MD5_PREFIX.len())
            .filter(|p| p.eq_ignore_ascii_case(MD5_PREFIX))
            .map(|_| raw[MD5_PREFIX.len()..].trim());
        match digest {
            Some(d) if d.len() == 32 && d.chars().all(|c| c.is_ascii_hexdigit()) => {
                Some(FormHash::Md5(d.to_ascii_lowercase()))
            }
            _ => Some(FormHash::Opaque(raw.to_string())),
        }
    }

    /// Returns `Some(true/false)` when this is an MD5 hash, `None` when it cannot be checked.
    pub fn matches_md5(&self, actual_hex: &str) -> Option<bool> {
        match self {
            FormHash::Md5(expected) => Some(expected.eq_ignore_ascii_case(actual_hex)),
            FormHash::Opaque(_) => None,
        }
    }
}

impl fmt::Display for FormHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormHash::Md5(d) => write!(f, "{}{}", MD5_PREFIX, d),
            FormHash::Opaque(raw) => f.write_str(raw),
        }
    }
}

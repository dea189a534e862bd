//! OpenRosa form manifest: the media attachments a form needs.

use roxmltree::Document;
use serde::Serialize;
use thiserror::Error;

use crate::form_list::{child_text, is_named};

/// One `<mediaFile>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    pub filename: String,
    pub hash: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("expected <manifest> root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("media file #{0} has no filename")]
    MissingFilename(usize),
}

/// Parse a `<manifest>` document.
pub fn parse_manifest(xml: &str) -> Result<Vec<MediaFile>, ManifestError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "manifest" {
        return Err(ManifestError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    root.children()
        .filter(|n| is_named(n, "mediaFile"))
        .enumerate()
        .map(|(i, node)| -> Result<MediaFile, ManifestError> {
            let filename =
                child_text(&node, "filename").ok_or(ManifestError::MissingFilename(i + 1))?;
            Ok(MediaFile {
                filename,
                hash: child_text(&node, "hash"),
                download_url: child_text(&node, "downloadUrl"),
            })
        })
        .collect()
}

//! Blocking fetch of one form definition and its media.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::FormDownloadError;
use crate::form_list::FormHash;
use crate::manifest::MediaFile;
use crate::naming;
use crate::openrosa::{Downloaded, ServerClient};
use crate::validate::DownloadableForm;

/// Files written for one form.
#[derive(Debug, Clone)]
pub(crate) struct FetchedForm {
    pub form_path: PathBuf,
    pub media_dir: Option<PathBuf>,
    pub media_files: usize,
}

fn part_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(".formsync-")
        .suffix(".part")
        .tempfile_in(dir)
}

/// Check a download against the published hash. Opaque hashes pass with a warning.
fn verify(file: &str, hash: &FormHash, got: &Downloaded) -> Result<(), FormDownloadError> {
    match hash.matches_md5(&got.md5) {
        Some(true) => Ok(()),
        Some(false) => Err(FormDownloadError::HashMismatch {
            file: file.to_string(),
            expected: match hash {
                FormHash::Md5(d) => d.clone(),
                FormHash::Opaque(raw) => raw.clone(),
            },
            actual: got.md5.clone(),
        }),
        None => {
            tracing::warn!(file, %hash, "hash is not md5; skipping content check");
            Ok(())
        }
    }
}

/// Download the form to a temp file, then its media, then move the form into place.
///
/// Nothing is left in `forms_dir` when this fails.
pub(crate) fn fetch_form(
    client: &ServerClient,
    form: &DownloadableForm,
    forms_dir: &Path,
) -> Result<FetchedForm, FormDownloadError> {
    let entry = &form.entry;
    let url = entry
        .download_url
        .as_deref()
        .ok_or(FormDownloadError::MissingDownloadUrl)?;

    fs::create_dir_all(forms_dir)?;
    let part = part_file(forms_dir)?;
    let got = client.download_to(url, part.path())?;
    verify(entry.display_name(), &form.hash, &got)?;
    tracing::debug!(form_id = %entry.form_id, bytes = got.bytes, "form definition downloaded");

    let stem = naming::form_file_stem(&entry.name, &entry.form_id);
    let form_path = naming::unique_path(forms_dir, &stem, "xml");

    let (media_dir, media_files) = match entry.manifest_url.as_deref() {
        Some(manifest_url) => {
            let media_dir = naming::media_dir_for(&form_path);
            let files = client.fetch_manifest(manifest_url)?;
            let planned = plan_media(&files)?;
            if let Err(e) = fetch_media(client, &planned, &media_dir) {
                let _ = fs::remove_dir_all(&media_dir);
                return Err(e);
            }
            (Some(media_dir), planned.len())
        }
        None => (None, 0),
    };

    install_form(part, &form_path, media_dir.as_deref())?;
    Ok(FetchedForm {
        form_path,
        media_dir,
        media_files,
    })
}

/// Rename the verified form into place, dropping its media dir if that fails.
fn install_form(
    part: NamedTempFile,
    form_path: &Path,
    media_dir: Option<&Path>,
) -> Result<(), FormDownloadError> {
    if let Err(e) = part.persist(form_path) {
        if let Some(dir) = media_dir {
            let _ = fs::remove_dir_all(dir);
        }
        return Err(e.error.into());
    }
    Ok(())
}

/// One manifest entry that passed checks, with its on-disk name.
#[derive(Debug)]
struct PlannedMedia<'a> {
    filename: &'a str,
    name: String,
    hash: FormHash,
    url: &'a str,
}

/// Check every manifest entry before anything is downloaded.
fn plan_media(files: &[MediaFile]) -> Result<Vec<PlannedMedia<'_>>, FormDownloadError> {
    let mut seen = HashSet::new();
    let mut planned = Vec::with_capacity(files.len());
    for file in files {
        let hash = file
            .hash
            .as_deref()
            .and_then(FormHash::parse)
            .ok_or_else(|| FormDownloadError::MediaMissingHash(file.filename.clone()))?;
        let url = file
            .download_url
            .as_deref()
            .ok_or_else(|| FormDownloadError::MediaMissingDownloadUrl(file.filename.clone()))?;
        let name = naming::media_filename(&file.filename)
            .ok_or_else(|| FormDownloadError::BadMediaFilename(file.filename.clone()))?;
        if !seen.insert(name.clone()) {
            return Err(FormDownloadError::DuplicateMediaFilename(name));
        }
        planned.push(PlannedMedia {
            filename: &file.filename,
            name,
            hash,
            url,
        });
    }
    Ok(planned)
}

fn fetch_media(
    client: &ServerClient,
    planned: &[PlannedMedia<'_>],
    media_dir: &Path,
) -> Result<(), FormDownloadError> {
    fs::create_dir_all(media_dir)?;
    for media in planned {
        let part = part_file(media_dir)?;
        let got = client.download_to(media.url, part.path())?;
        verify(media.filename, &media.hash, &got)?;
        part.persist(media_dir.join(&media.name)).map_err(|e| e.error)?;
        tracing::debug!(file = %media.name, bytes = got.bytes, "media file downloaded");
    }
    Ok(())
}

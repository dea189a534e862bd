//! User-facing text for download results.

/// Shown when a form list entry has no `<hash>`.
pub const FORM_WITH_NO_HASH_ERROR: &str = "The server did not include a hash for this form. \
A hash is required for every form in the form list, so the form cannot be downloaded.";

/// Follow-up instruction appended to errors that need a server-side fix.
pub const REPORT_TO_PROJECT_LEAD: &str =
    "Please report this to your project lead so the server can be fixed.";

/// Prefix of the detail for a manifest entry without a `<hash>`.
const MEDIA_WITH_NO_HASH_ERROR: &str =
    "The server did not include a hash for the media file";

pub const ALL_DOWNLOADS_SUCCEEDED: &str = "All downloads succeeded!";

/// `"N of M downloads failed!"`.
pub fn downloads_failed(failed: usize, total: usize) -> String {
    format!("{} of {} downloads failed!", failed, total)
}

/// Detail text for a form list entry without a hash.
pub fn form_with_no_hash_detail() -> String {
    join(&[FORM_WITH_NO_HASH_ERROR, REPORT_TO_PROJECT_LEAD])
}

/// Detail text for a manifest media file without a hash.
pub fn media_with_no_hash_detail(filename: &str) -> String {
    let first = format!("{} \"{}\".", MEDIA_WITH_NO_HASH_ERROR, filename);
    join(&[&first, REPORT_TO_PROJECT_LEAD])
}

/// Join message fragments with a single space.
pub fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downloads_failed_format() {
        assert_eq!(downloads_failed(1, 1), "1 of 1 downloads failed!");
        assert_eq!(downloads_failed(2, 5), "2 of 5 downloads failed!");
    }

    #[test]
    fn no_hash_detail_is_both_messages() {
        assert_eq!(
            form_with_no_hash_detail(),
            format!("{} {}", FORM_WITH_NO_HASH_ERROR, REPORT_TO_PROJECT_LEAD)
        );
    }

    #[test]
    fn media_detail_names_the_file() {
        let d = media_with_no_hash_detail("badger.png");
        assert!(d.contains("\"badger.png\""));
        assert!(d.ends_with(REPORT_TO_PROJECT_LEAD));
    }
}

//! Local filenames for downloaded forms and media.

use std::path::{Path, PathBuf};

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;
/// Room left for a `_NN` collision suffix plus extension or `-media`.
const STEM_MAX: usize = NAME_MAX - 16;

/// Make `name` safe as a single Linux path component.
///
/// NUL, slashes, control characters and whitespace runs become one `_`;
/// leading/trailing dots, spaces and underscores are trimmed; the result is
/// cut at a char boundary within `max_len` bytes. May return an empty string.
pub fn sanitize_component(name: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c == '/' || c == '\\' || c == '\0' || c.is_control() || c.is_whitespace() {
            pending_sep = !out.is_empty();
            continue;
        }
        if c == '_' {
            pending_sep = !out.is_empty();
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(max_len);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].trim_end_matches(['.', '_']).to_string()
}

/// File stem for a form: its display name, else its id, else `form`.
pub fn form_file_stem(name: &str, form_id: &str) -> String {
    [name, form_id]
        .iter()
        .map(|candidate| sanitize_component(candidate, STEM_MAX))
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "form".to_string())
}

/// Safe filename for a media attachment; `None` if nothing usable remains.
pub fn media_filename(name: &str) -> Option<String> {
    let s = sanitize_component(name, NAME_MAX);
    (!s.is_empty()).then_some(s)
}

/// First free `dir/stem.ext`, `dir/stem_2.ext`, `dir/stem_3.ext`, ...
///
/// A candidate is taken only if neither the file nor its `-media` directory exists.
pub fn unique_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut n = 1u32;
    loop {
        let candidate_stem = if n == 1 {
            stem.to_string()
        } else {
            format!("{}_{}", stem, n)
        };
        let path = dir.join(format!("{}.{}", candidate_stem, ext));
        if !path.exists() && !media_dir_for(&path).exists() {
            return path;
        }
        n += 1;
    }
}

/// `forms/Foo.xml` -> `forms/Foo-media`.
pub fn media_dir_for(form_path: &Path) -> PathBuf {
    let stem = form_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "form".to_string());
    form_path.with_file_name(format!("{}-media", stem))
}
